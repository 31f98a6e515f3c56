// tests/gdal_io.rs
use gdal::raster::Buffer;
use gdal::{Dataset, DriverManager, Metadata};
use std::path::{Path, PathBuf};

use spectrapro::{
    BandReader, Error, GdalRasterReader, OutputFormat, Pipeline, ProcessingParams, ReadError,
    process_directory_to_path, process_file_to_buffer, process_file_to_path,
};

const WGS84_WKT: &str = r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563,AUTHORITY["EPSG","7030"]],AUTHORITY["EPSG","6326"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4326"]]"#;
const GEOTRANSFORM: [f64; 6] = [12.0, 0.001, 0.0, 55.0, 0.0, -0.001];

/// Write a georeferenced f64 GeoTIFF where band `i` (1-based) is filled by `value(i)`
fn write_scene(path: &Path, rows: usize, cols: usize, count: usize, value: impl Fn(usize) -> f64) {
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut ds = driver
        .create_with_band_type::<f64, _>(path, cols, rows, count)
        .unwrap();
    ds.set_geo_transform(&GEOTRANSFORM).unwrap();
    ds.set_projection(WGS84_WKT).unwrap();
    for i in 1..=count {
        let mut band = ds.rasterband(i).unwrap();
        let mut buf = Buffer::new((cols, rows), vec![value(i); rows * cols]);
        band.write((0, 0), (cols, rows), &mut buf).unwrap();
    }
}

fn lake_scene(dir: &Path) -> PathBuf {
    let path = dir.join("lake.tif");
    write_scene(&path, 10, 10, 5, |i| if i == 5 { 50.0 } else { 100.0 });
    path
}

fn water_params(format: OutputFormat) -> ProcessingParams {
    ProcessingParams {
        pipeline: Pipeline::Water,
        format,
        threshold: 0.2,
        world_file: true,
        ..Default::default()
    }
}

#[test]
fn reader_reports_dimensions_bands_and_crs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.tif");
    write_scene(&path, 4, 9, 7, |i| i as f64 * 10.0);

    let reader = GdalRasterReader::open(&path).unwrap();
    assert_eq!(reader.dimensions(), (4, 9));
    assert_eq!(reader.band_count(), 7);
    assert_eq!(reader.metadata.geotransform, Some(GEOTRANSFORM));
    assert_eq!(reader.metadata.epsg.as_deref(), Some("EPSG:4326"));

    let band = reader.read_band(3).unwrap();
    assert_eq!(band.dim(), (4, 9));
    assert!(band.iter().all(|&v| v == 30.0));
    assert!(matches!(
        reader.read_band(8),
        Err(ReadError::BandOutOfRange { index: 8, count: 7 })
    ));
}

#[test]
fn water_detection_from_file_to_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let input = lake_scene(dir.path());

    let processed = process_file_to_buffer(&input, &water_params(OutputFormat::TIFF)).unwrap();
    assert_eq!((processed.width, processed.height), (10, 10));
    assert_eq!(processed.image.dim(), (10, 10, 3));
    assert!(
        processed
            .image
            .lanes(ndarray::Axis(2))
            .into_iter()
            .all(|p| p.to_vec() == vec![60, 130, 255])
    );
    let water = processed.water.unwrap();
    assert_eq!((water.water_pixels, water.total_pixels), (100, 100));
}

#[test]
fn tiff_output_keeps_georeferencing_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let input = lake_scene(dir.path());
    let output = dir.path().join("water.tiff");

    process_file_to_path(&input, &output, &water_params(OutputFormat::TIFF)).unwrap();

    let ds = Dataset::open(&output).unwrap();
    assert_eq!(ds.raster_size(), (10, 10));
    assert_eq!(ds.raster_count(), 3);
    assert_eq!(ds.geo_transform().unwrap(), GEOTRANSFORM);
    assert_eq!(ds.metadata_item("PIPELINE", "").as_deref(), Some("Water"));
    assert_eq!(ds.metadata_item("CRS", "").as_deref(), Some("EPSG:4326"));
    assert_eq!(ds.metadata_item("WATER_PIXELS", "").as_deref(), Some("100"));

    let blue = ds.rasterband(3).unwrap();
    let buf = blue.read_as::<u8>((0, 0), (10, 10), (10, 10), None).unwrap();
    assert!(buf.data().iter().all(|&v| v == 255));

    assert!(dir.path().join("water.tfw").exists());
    assert!(dir.path().join("water.prj").exists());
}

#[test]
fn jpeg_output_gets_sidecar_and_world_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = lake_scene(dir.path());
    let output = dir.path().join("water.jpg");

    process_file_to_path(&input, &output, &water_params(OutputFormat::JPEG)).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let sidecar: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("water.json")).unwrap())
            .unwrap();
    assert_eq!(sidecar["pipeline"], "water");
    assert_eq!(sidecar["ndwi_threshold"], 0.2);
    assert_eq!(sidecar["water"]["water_pixels"], 100);
    assert_eq!(sidecar["epsg"], "EPSG:4326");

    let world = std::fs::read_to_string(dir.path().join("water.jgw")).unwrap();
    assert_eq!(world.lines().count(), 6);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GdalRasterReader::open(dir.path().join("absent.tif")).err().unwrap();
    assert!(matches!(err, ReadError::Io(_)));

    let err = process_file_to_buffer(&dir.path().join("absent.tif"), &ProcessingParams::default())
        .unwrap_err();
    assert!(matches!(err, Error::RasterRead(ReadError::Io(_))));
}

#[test]
fn text_file_is_not_a_raster() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.tif");
    std::fs::write(&path, "definitely not a GeoTIFF").unwrap();

    let err = GdalRasterReader::open(&path).err().unwrap();
    assert!(matches!(err, ReadError::NotRaster { .. }));

    let err = GdalRasterReader::open(dir.path()).err().unwrap();
    assert!(matches!(err, ReadError::NotRaster { .. }));
}

#[test]
fn three_band_file_is_insufficient_for_both_pipelines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rgb.tif");
    write_scene(&path, 3, 3, 3, |i| i as f64);

    let err = process_file_to_buffer(&path, &ProcessingParams::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientBands {
            actual: 3,
            required: 7
        }
    ));

    let err = process_file_to_buffer(&path, &water_params(OutputFormat::TIFF)).unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientBands {
            actual: 3,
            required: 5
        }
    ));
}

#[test]
fn batch_writes_one_output_per_raster() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_scene(&input.path().join("a.tif"), 6, 6, 7, |i| i as f64);
    write_scene(&input.path().join("b.TIF"), 6, 6, 7, |i| (8 - i) as f64);
    std::fs::write(input.path().join("index.html"), "<html/>").unwrap();

    let params = ProcessingParams {
        format: OutputFormat::JPEG,
        ..Default::default()
    };
    let report = process_directory_to_path(input.path(), output.path(), &params, false).unwrap();
    assert_eq!((report.processed, report.skipped, report.errors), (2, 1, 0));
    assert!(output.path().join("a.jpg").exists());
    assert!(output.path().join("b.jpg").exists());
    assert!(output.path().join("a.json").exists());
}
