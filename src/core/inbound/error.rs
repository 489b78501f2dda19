use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Source file not found: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed source data: {0}")]
    #[diagnostic(help("expected a JSON array of objects with id, age and name fields"))]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = miette::Result<T, Error>;
