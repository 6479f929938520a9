//! widervoc: WIDER FACE annotations to Pascal VOC XML.
//!
//! Reads the WIDER FACE ground-truth text file and writes one VOC XML file
//! per image, carrying the six WIDER attribute labels (blur, expression,
//! illumination, invalid, occlusion, pose) on every `<object>`.
//!
//! # Modules
//!
//! - [`wider`]: WIDER FACE text reader
//! - [`codes`]: attribute code tables
//! - [`image_meta`]: image identifier splitting and dimension reads
//! - [`voc`]: VOC XML records and writer
//! - [`convert`]: the batch driver
//! - [`error`]: Error types for widervoc operations

pub mod codes;
pub mod convert;
pub mod error;
pub mod image_meta;
pub mod voc;
pub mod wider;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub use convert::{convert_annotations, ConversionReport, ConvertOptions};
pub use error::WiderVocError;

/// The widervoc CLI application.
#[derive(Parser)]
#[command(name = "widervoc")]
#[command(version, about)]
struct Cli {
    /// The annotations file path, e.g. "./wider_face_split/wider_face_train_bbx_gt.txt".
    #[arg(short = 'a', long = "annotations-path")]
    annotations_path: PathBuf,

    /// The target directory where XML files are written (created if missing).
    #[arg(short = 't', long = "target-path")]
    target_path: PathBuf,

    /// The images directory path, e.g. "./WIDER_train/images".
    #[arg(short = 'i', long = "images-path")]
    images_path: PathBuf,

    /// How to print the summary to stderr after conversion.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

/// Summary output formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the widervoc CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), WiderVocError> {
    let cli = Cli::parse();

    let options = ConvertOptions {
        annotations_path: cli.annotations_path,
        target_dir: cli.target_path,
        images_dir: cli.images_path,
    };

    let report = convert_annotations(&options)?;

    // stdout carries only the per-image progress lines.
    match cli.report {
        ReportFormat::Json => eprintln!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => eprint!("{}", report),
    }

    Ok(())
}
