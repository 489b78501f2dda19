use crate::core::types::{Record, TransformedRecord};

/// A pure, deterministic mapping from an input record to its derived form.
///
/// Implementations run on the blocking thread pool and must not perform I/O.
pub trait Transform: Send + Sync + 'static {
    fn apply(&self, record: Record) -> TransformedRecord;
}

impl<F> Transform for F
where
    F: Fn(Record) -> TransformedRecord + Send + Sync + 'static,
{
    fn apply(&self, record: Record) -> TransformedRecord {
        self(record)
    }
}
