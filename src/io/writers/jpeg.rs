use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::types::OutputImage;

/// Encode an RGB image as a quality-100 JPEG.
pub fn write_rgb_jpeg(output: &Path, image: &OutputImage) -> Result<(), Box<dyn std::error::Error>> {
    let (rows, cols, _) = image.dim();
    let width = u16::try_from(cols).map_err(|_| format!("JPEG width {} exceeds 65535", cols))?;
    let height = u16::try_from(rows).map_err(|_| format!("JPEG height {} exceeds 65535", rows))?;

    // standard layout iterates (row, col, channel), i.e. interleaved RGB
    let rgb_data: Vec<u8> = image.iter().copied().collect();

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, 100);
    encoder.encode(&rgb_data, width, height, ColorType::Rgb)?;
    Ok(())
}
