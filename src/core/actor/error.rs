use miette::Diagnostic;
use thiserror::Error;

use crate::core::tag::TagId;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Stage error: {0}")]
    Stage(#[from] crate::core::stage::Error),
    #[error("Worker error: {0}")]
    Worker(#[from] crate::core::worker::Error),
    #[error("Collector error: {0}")]
    Collector(#[from] crate::core::collector::Error),
    #[error("{0} was cancelled")]
    Cancelled(TagId),
    #[error("Actor task was lost: {0}")]
    Lost(String),
}

pub type Result<T> = miette::Result<T, Error>;
