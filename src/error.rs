use std::path::PathBuf;
use thiserror::Error;

/// The main error type for widervoc operations.
#[derive(Debug, Error)]
pub enum WiderVocError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read annotations from {path}: {source}")]
    AnnotationsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse WIDER FACE annotations at {path}:{line}: {message}")]
    AnnotationParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid image path '{path}': {message}")]
    ImagePathFormat { path: String, message: String },

    #[error("Unknown {attribute} code '{code}'")]
    UnknownAttributeCode {
        attribute: &'static str,
        code: String,
    },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Failed to write VOC XML to {path}: {source}")]
    VocWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write conversion report as JSON: {0}")]
    ReportJson(#[from] serde_json::Error),
}
