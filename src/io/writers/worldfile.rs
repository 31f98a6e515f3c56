use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sidecar world file path for an image: `.tfw`, `.jgw`, `.pgw`, else `.wld`.
pub fn world_file_path(output_image: &Path) -> PathBuf {
    let ext = output_image
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let world_ext = match ext.as_str() {
        "jpg" | "jpeg" => "jgw",
        "png" => "pgw",
        "tif" | "tiff" => "tfw",
        _ => "wld",
    };
    output_image.with_extension(world_ext)
}

/// Write a world file next to the image from a GDAL geotransform.
/// World files reference the centre of the upper-left pixel.
pub fn write_world_file(output_image: &Path, geotransform: [f64; 6]) -> std::io::Result<PathBuf> {
    let [origin_x, pixel_w, rot_x, origin_y, rot_y, pixel_h] = geotransform;
    let center_x = origin_x + 0.5 * pixel_w + 0.5 * rot_x;
    let center_y = origin_y + 0.5 * rot_y + 0.5 * pixel_h;

    let world_path = world_file_path(output_image);
    let mut file = File::create(&world_path)?;
    for value in [pixel_w, rot_y, rot_x, pixel_h, center_x, center_y] {
        writeln!(file, "{:.12}", value)?;
    }
    Ok(world_path)
}

/// Write a .prj file with the provided projection (WKT or EPSG:XXXX)
pub fn write_prj_file(output_image: &Path, projection: &str) -> std::io::Result<()> {
    std::fs::write(output_image.with_extension("prj"), projection.as_bytes())
}
