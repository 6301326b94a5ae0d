use clap::{Parser, Subcommand};
use lambda_runtime::{LambdaEvent, service_fn};
use s3_thumbnailer::imaging::{RustCodec, ThumbnailConfig, thumbnail_file};
use s3_thumbnailer::storage::S3Store;
use s3_thumbnailer::{HandlerConfig, ImageResizeHandler, S3Event};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "s3-thumbnailer")]
#[command(about = "Resize uploaded images to 128x128 JPEG thumbnails")]
#[command(long_about = "\
Resize uploaded images to 128x128 JPEG thumbnails

Deployed as the bootstrap of an AWS Lambda function subscribed to a bucket's
ObjectCreated notifications. Each invocation reads the first record, fetches
the object, and writes a 128x128 JPEG to $OUTPUT_BUCKET under the same key.

Environment:
  OUTPUT_BUCKET   destination bucket (required for `serve`)
  RUST_LOG        log filter, default `info`

With no subcommand the Lambda runtime loop is started.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the Lambda runtime loop (the default)
    Serve,
    /// Thumbnail a local image file, without touching S3
    Resize {
        /// Source image (any supported format)
        input: PathBuf,
        /// Where to write the JPEG
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Resize { input, output } => {
            let encoded = thumbnail_file(
                &RustCodec::new(),
                &input,
                &output,
                &ThumbnailConfig::default(),
            )?;
            println!(
                "{} ({}) → {} ({}, {} bytes)",
                input.display(),
                encoded.source_dimensions,
                output.display(),
                encoded.dimensions,
                encoded.data.len()
            );
            Ok(())
        }
    }
}

/// Cold start: config and S3 client are built once, then every invocation
/// borrows the same handler.
async fn serve() -> Result<(), lambda_runtime::Error> {
    let config = HandlerConfig::from_env()?;
    tracing::info!(output_bucket = %config.output_bucket, "Starting thumbnail handler");

    let store = S3Store::from_env().await;
    let handler = ImageResizeHandler::new(config, store, RustCodec::new());
    let handler = &handler;

    lambda_runtime::run(service_fn(|event: LambdaEvent<S3Event>| async move {
        handler
            .handle(&event.payload)
            .await
            .map_err(lambda_runtime::Error::from)
    }))
    .await
}

/// JSON lines inside Lambda (CloudWatch indexes the fields), plain text
/// everywhere else.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if std::env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some() {
        builder.json().without_time().init();
    } else {
        builder.init();
    }
}
