use miette::Diagnostic;
use thiserror::Error;

use crate::core::tag::TagId;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Stage(#[from] crate::core::stage::Error),
    #[error(transparent)]
    Collector(#[from] crate::core::collector::Error),
    #[error("{0}: transform aborted: {1}")]
    #[diagnostic(help("transforms are expected to be infallible, this is a bug in the transform"))]
    TransformPanicked(TagId, String),
}

pub type Result<T> = miette::Result<T, Error>;
