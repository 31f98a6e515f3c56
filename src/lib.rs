#![doc = r#"
SPECTRAPRO — multispectral satellite raster to image processing.

This crate turns multi-band reflectance rasters (Landsat OLI-style band layouts) into
8-bit RGB images. Two pipelines are provided:

- **False-color composite**: three bands (default 7, 3, 2) stacked as R, G, B and
  rescaled jointly into 0..=255.
- **Water detection**: NDWI = (Green − NIR) / (Green + NIR) thresholded into a water
  mask, painted over a 2–98 percentile stretched natural-color background.

Both are pure functions of a [`raster::BandReader`] and scalar parameters. Rasters on
disk are read through GDAL ([`io::GdalRasterReader`]); anything else can implement
`BandReader` or use [`raster::InMemoryRaster`].

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Quick start: in-memory bands
----------------------------
```rust
use ndarray::Array2;
use spectrapro::{InMemoryRaster, detect_water_bodies};

fn main() -> spectrapro::Result<()> {
    let bands: Vec<Array2<f64>> = (1..=5)
        .map(|i| Array2::from_elem((10, 10), if i == 5 { 50.0 } else { 100.0 }))
        .collect();
    let raster = InMemoryRaster::new(bands)?;

    let image = detect_water_bodies(&raster, 0.2)?;
    assert_eq!(image.dim(), (10, 10, 3));
    assert_eq!(image[[0, 0, 2]], 255);
    Ok(())
}
```

Process a file to disk
----------------------
```rust,no_run
use std::path::Path;
use spectrapro::{process_file_to_path, OutputFormat, Pipeline, ProcessingParams};

fn main() -> spectrapro::Result<()> {
    let params = ProcessingParams {
        pipeline: Pipeline::Water,
        format: OutputFormat::JPEG,
        threshold: 0.1,
        world_file: true,
        ..Default::default()
    };
    process_file_to_path(Path::new("/data/LC08_scene.tif"), Path::new("/out/water.jpg"), &params)
}
```

Error handling
--------------
All public functions return `spectrapro::Result<T>`. Every `spectrapro::Error` classifies
into an [`ErrorKind`]; match on the variants for details, e.g. the actual and required
band counts of `Error::InsufficientBands`.

```rust,no_run
use std::path::Path;
use spectrapro::{process_file_to_buffer, Error, ProcessingParams};

fn main() {
    match process_file_to_buffer(Path::new("/bad/scene.tif"), &ProcessingParams::default()) {
        Ok(img) => println!("{}x{}", img.width, img.height),
        Err(Error::InsufficientBands { actual, required }) => {
            eprintln!("need {required} bands, got {actual}")
        }
        Err(Error::RasterRead(e)) => eprintln!("could not read raster: {e}"),
        Err(other) => eprintln!("{other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — the processing components (composite, index, stretch, mask) and pipelines.
- [`raster`] — the `BandReader` seam and `InMemoryRaster`.
- [`io`] — GDAL reader and TIFF/JPEG writers.
- [`types`] — enums and array aliases.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod raster;
pub mod types;

// Curated public API surface
pub use crate::core::params::ProcessingParams;
pub use crate::core::processing::pipeline::WaterDetection;
pub use error::{Error, Result};
pub use raster::{BandReader, InMemoryRaster, ReadError};
pub use types::{
    BandTriplet, DEFAULT_HIGHLIGHT, ErrorKind, IndexArray, OutputFormat, OutputImage, Pipeline,
    Rgb, WaterMask, WaterSummary,
};

// Readers
pub use io::gdal::{GdalRasterReader, RasterMetadata};

// High-level API re-exports
pub use api::{
    BatchReport, ProcessedImage, build_false_color_composite, build_false_color_composite_with,
    detect_water_bodies, detect_water_bodies_with, iterate_raster_files,
    process_directory_to_path, process_file_to_buffer, process_file_to_path, process_raster,
};
