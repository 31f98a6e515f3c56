use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::io::writers::jpeg::write_rgb_jpeg;
use crate::io::writers::metadata::{
    OutputMetadata, embed_tiff_metadata, is_identity_geotransform, write_metadata_sidecar,
};
use crate::io::writers::tiff::write_tiff_rgb_u8;
use crate::io::writers::worldfile::{write_prj_file, write_world_file};
use crate::types::{OutputFormat, OutputImage};

/// Save a rendered image. TIFF embeds georeferencing and metadata; JPEG gets a
/// JSON sidecar. With `world_file`, a world file and .prj are written whenever a
/// non-identity geotransform is known.
pub fn save_image(
    image: &OutputImage,
    output: &Path,
    format: OutputFormat,
    metadata: &OutputMetadata,
    world_file: bool,
) -> Result<()> {
    let (rows, cols, _) = image.dim();
    match format {
        OutputFormat::TIFF => {
            let mut ds = write_tiff_rgb_u8(output, image).map_err(Error::unclassified)?;
            embed_tiff_metadata(&mut ds, metadata).map_err(Error::unclassified)?;
            info!("save_image: {}x{} RGB TIFF saved to {:?}", cols, rows, output);
        }
        OutputFormat::JPEG => {
            write_rgb_jpeg(output, image).map_err(Error::unclassified)?;
            write_metadata_sidecar(output, metadata).map_err(Error::unclassified)?;
            info!("save_image: {}x{} RGB JPEG saved to {:?}", cols, rows, output);
        }
    }

    if world_file {
        if let Some(gt) = metadata.geotransform.filter(|gt| !is_identity_geotransform(*gt)) {
            let world_path = write_world_file(output, gt)?;
            if let Some(crs) = metadata.crs.as_deref() {
                write_prj_file(output, crs)?;
            }
            info!("World file written: {:?}", world_path);
        }
    }
    Ok(())
}
