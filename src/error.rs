use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing run artifacts and assembling the maps.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed output variable record: \"{line}\"")]
    MalformedRecord { line: String },

    #[error("no testfiles directory under build tree: {path}")]
    TestFilesMissing { path: PathBuf },

    #[error("not a run directory (no output variable listing): {path}")]
    NotARunDirectory { path: PathBuf },

    #[error("no input document found for run: {run}")]
    InputDocumentMissing { run: String },

    #[error("failed to parse input document {path}: {source}")]
    InputDocumentParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MapperError>;

impl MapperError {
    pub fn malformed_record<S: Into<String>>(line: S) -> Self {
        Self::MalformedRecord { line: line.into() }
    }

    pub fn document_missing<S: Into<String>>(run: S) -> Self {
        Self::InputDocumentMissing { run: run.into() }
    }
}
