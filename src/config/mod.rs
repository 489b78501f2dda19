pub mod error;
pub mod global;
pub mod pipeline;
pub mod report;
pub mod source;

use std::path::{Path, PathBuf};

pub use error::{Error, Result};
use global::{GlobalConfig, GLOBAL_CONFIG};
use log::warn;
use pipeline::PipelineConfig;
use report::ReportConfig;
use serde::{Deserialize, Serialize};
use source::SourceConfig;
use std::{fs::File, io::BufReader};

pub trait Verify {
    fn verify(&mut self) -> error::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    pub fn load_from_file(path: &Path) -> error::Result<Self> {
        if !path.exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Config file not found: {}", path.display()),
            )));
        }

        if !path.is_file() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Given config file path is not a file: {}", path.display()),
            )));
        }

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let config: Config = match ext {
            "json" => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            "toml" => {
                let text = std::fs::read_to_string(path)?;
                toml::de::from_str(&text)?
            }
            _ => return Err(Error::InvalidConfigFileFormat(ext.to_string())),
        };

        Ok(config)
    }

    /// Verifies the configuration and publishes the global section.
    pub fn finalize(mut self) -> error::Result<Self> {
        self.verify()?;

        if GLOBAL_CONFIG.set(self.global.clone()).is_err() {
            warn!("Global config already set, keeping the first one");
        }

        Ok(self)
    }

    pub fn with_input(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.source.path = path;
        }
        self
    }

    pub fn with_output(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.report.path = path;
        }
        self
    }

    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        if let Some(workers) = workers {
            self.pipeline.workers = pipeline::WorkerCount::Fixed(workers);
        }
        self
    }
}

impl Verify for Config {
    fn verify(&mut self) -> error::Result<()> {
        self.global.verify()?;
        self.source.verify()?;
        self.report.verify()?;
        self.pipeline.verify()?;

        Ok(())
    }
}
