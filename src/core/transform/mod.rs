mod base;
mod complex;

use std::sync::Arc;

pub use base::Transform;
pub use complex::{ComplexCalculation, DEFAULT_INNER_ROUNDS, DEFAULT_ROUNDS};

use crate::config::pipeline::TransformConfig;

pub fn create_from(cfg: &TransformConfig) -> Arc<dyn Transform> {
    match cfg {
        TransformConfig::Complex {
            rounds,
            inner_rounds,
        } => Arc::new(ComplexCalculation::new(*rounds, *inner_rounds)),
    }
}
