use serde::{Deserialize, Serialize};

use super::TransformedRecord;

/// Acceptance rule applied to every transformed record. Only records that
/// pass reach the collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    #[default]
    NegativeAge,
    NegativeId,
}

impl Predicate {
    pub fn accepts(&self, record: &TransformedRecord) -> bool {
        match self {
            Predicate::NegativeAge => record.age < 0.0,
            Predicate::NegativeId => record.id < 0,
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::NegativeAge => write!(f, "age < 0"),
            Predicate::NegativeId => write!(f, "id < 0"),
        }
    }
}
