use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Empty field: {0}.{1}")]
    EmptyField(&'static str, &'static str),
    #[error("Invalid config file format: {0}")]
    #[diagnostic(help("use a .json or .toml file"))]
    InvalidConfigFileFormat(String),
    #[error(transparent)]
    InvalidJsonConfig(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidTomlConfig(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
