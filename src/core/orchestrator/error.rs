use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("No input records, nothing to run")]
    EmptyInput,
    #[error("Worker count must be at least 1")]
    NoWorkers,
    #[error("Feeding the stage buffer failed: {0}")]
    Feed(#[from] crate::core::stage::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Actor(#[from] crate::core::actor::Error),
    #[error("Actor task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Expected {expected} records to be transformed, got {transformed}")]
    #[diagnostic(help("every input record must reach exactly one worker"))]
    LostRecords { expected: usize, transformed: usize },
    #[error("Collector delivered {drained} records but workers accepted {accepted}")]
    Undelivered { accepted: usize, drained: usize },
}

pub type Result<T> = miette::Result<T, Error>;
