use serde::{Deserialize, Serialize};

use super::{Error, Verify};
use crate::core::{
    transform::{DEFAULT_INNER_ROUNDS, DEFAULT_ROUNDS},
    types::Predicate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerPolicy {
    /// Uniform in `[2, n / 4 + 2)` for `n` input records.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkerCount {
    Fixed(usize),
    Policy(WorkerPolicy),
}

impl Default for WorkerCount {
    fn default() -> Self {
        WorkerCount::Policy(WorkerPolicy::Random)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(tag = "type")]
pub enum TransformConfig {
    Complex {
        #[serde(default = "default_rounds")]
        rounds: u64,
        #[serde(default = "default_inner_rounds")]
        inner_rounds: u64,
    },
}

fn default_rounds() -> u64 {
    DEFAULT_ROUNDS
}

fn default_inner_rounds() -> u64 {
    DEFAULT_INNER_ROUNDS
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig::Complex {
            rounds: default_rounds(),
            inner_rounds: default_inner_rounds(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub workers: WorkerCount,
    #[serde(default)]
    pub predicate: Predicate,
    /// Overrides the stage buffer sizing policy.
    #[serde(default)]
    pub stage_capacity: Option<usize>,
    #[serde(default)]
    pub transform: TransformConfig,
}

impl Verify for PipelineConfig {
    fn verify(&mut self) -> super::Result<()> {
        if self.workers == WorkerCount::Fixed(0) {
            return Err(Error::InvalidConfig(
                "pipeline.workers must be at least 1".into(),
            ));
        }

        if self.stage_capacity == Some(0) {
            return Err(Error::InvalidConfig(
                "pipeline.stage_capacity must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
