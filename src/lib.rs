//! idxload: decoder for IDX (MNIST) label and image files.
//!
//! IDX files hold a big-endian header followed by fixed-width byte
//! records. This crate validates the header, streams the records, and
//! hands back plain `f64` arrays ready for numeric code. It does not
//! normalize, shuffle, batch or train on anything.
//!
//! # Modules
//!
//! - [`idx`]: Stream and file readers/writers for label and image files
//! - [`inspect`]: Summary statistics for a decoded file
//! - [`mnist`]: Loading paired label/image files and MNIST directories
//! - [`error`]: Error types for idxload operations

pub mod error;
pub mod idx;
pub mod inspect;
pub mod mnist;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::{FormatError, IdxError};

/// The idxload CLI application.
#[derive(Parser)]
#[command(name = "idxload")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Decode an IDX file and print a summary of its contents.
    Inspect(InspectArgs),
    /// Decode a label file and an image file and check that they pair up.
    Verify(VerifyArgs),
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// IDX file to inspect (labels or images, optionally gzipped).
    input: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Number of label values to list in the histogram.
    #[arg(long, default_value_t = 10)]
    top_labels: usize,

    /// Largest accepted image size in pixels (rows * cols).
    #[arg(
        long,
        env = "IDXLOAD_MAX_IMAGE_PIXELS",
        default_value_t = idx::DEFAULT_MAX_IMAGE_PIXELS
    )]
    max_image_pixels: usize,
}

/// Arguments for the verify subcommand.
#[derive(clap::Args)]
struct VerifyArgs {
    /// Label file (`*-labels-idx1-ubyte`).
    labels: PathBuf,

    /// Image file (`*-images-idx3-ubyte`).
    images: PathBuf,
}

/// Run the idxload CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), IdxError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Verify(args)) => run_verify(args),
        None => {
            println!("idxload {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Decoder for IDX (MNIST) label and image files.");
            println!();
            println!("Run 'idxload --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), IdxError> {
    let opts = inspect::InspectOptions {
        top_labels: args.top_labels,
        decode: idx::DecodeOptions {
            max_image_pixels: args.max_image_pixels,
        },
        ..Default::default()
    };

    // Reject a bad --output before spending time on a large file
    if !matches!(args.output.as_str(), "text" | "json") {
        return Err(IdxError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            args.output
        )));
    }

    let report = inspect::inspect_file(&args.input, &opts)?;

    if args.output == "json" {
        let json = serde_json::to_string_pretty(&report).map_err(IdxError::ReportJson)?;
        println!("{}", json);
    } else {
        print!("{}", report);
    }

    Ok(())
}

/// Execute the verify subcommand.
fn run_verify(args: VerifyArgs) -> Result<(), IdxError> {
    let split = mnist::load_split(&args.labels, &args.images)?;
    println!(
        "OK: {} labelled image(s) of {}x{}",
        split.len(),
        split.images.rows,
        split.images.cols
    );
    Ok(())
}
