use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Error, Verify};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("data.json")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
        }
    }
}

impl Verify for SourceConfig {
    fn verify(&mut self) -> super::Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::EmptyField("source", "path"));
        }

        Ok(())
    }
}
