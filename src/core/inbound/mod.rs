mod error;
mod json;

pub use error::{Error, Result};
pub use json::load_records;
