use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use spectrapro::{ProcessingParams, process_directory_to_path, process_file_to_path};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn process_single_file(
    input: &Path,
    output: &Path,
    params: &ProcessingParams,
) -> Result<(), AppError> {
    info!(
        "Processing {:?} -> {:?} ({} pipeline, {:?})",
        input, output, params.pipeline, params.format
    );
    process_file_to_path(input, output, params)?;
    info!("Successfully processed: {:?} -> {:?}", input, output);
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    if args.log {
        init_logging();
    }

    let params = args.params()?;
    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report = process_directory_to_path(&input_dir, &output_dir, &params, args.batch)?;

        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = args.output.ok_or(AppError::MissingArgument {
            arg: "--output".to_string(),
        })?;

        process_single_file(&input, &output, &params)?;
    }

    Ok(())
}
