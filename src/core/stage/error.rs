use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Stage buffer has shut down")]
    Closed,
    #[error("All consumers left the stage buffer with {0} records still queued")]
    #[diagnostic(help("workers must keep pulling until the stage reports exhaustion"))]
    Abandoned(usize),
}

pub type Result<T> = miette::Result<T, Error>;
