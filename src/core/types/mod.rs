mod predicate;
mod record;

pub use predicate::Predicate;
pub use record::{Record, TransformedRecord};
