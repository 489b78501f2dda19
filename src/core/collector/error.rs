use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Collector is no longer accepting submissions")]
    Closed,
    #[error("Drain was dropped with {0} accepted records undelivered")]
    DrainDropped(usize),
}

pub type Result<T> = miette::Result<T, Error>;
