use log::info;
use serde::{Deserialize, Serialize};

use super::{Error, Verify};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Bound of the pull request and submission channels.
    #[serde(default = "default_channel_buffer_size")]
    pub channel_buffer_size: usize,
}

fn default_channel_buffer_size() -> usize {
    1
}

pub static GLOBAL_CONFIG: once_cell::sync::OnceCell<GlobalConfig> =
    once_cell::sync::OnceCell::new();

pub fn channel_buffer_size() -> usize {
    GLOBAL_CONFIG
        .get()
        .map_or(default_channel_buffer_size(), |config| {
            config.channel_buffer_size
        })
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer_size(),
        }
    }
}

impl Verify for GlobalConfig {
    fn verify(&mut self) -> super::Result<()> {
        if self.channel_buffer_size == 0 {
            return Err(Error::InvalidConfig(
                "global.channel_buffer_size must be at least 1".into(),
            ));
        }

        info!("Global Settings: ");
        info!("  - channel_buffer_size: {}", self.channel_buffer_size);

        Ok(())
    }
}
