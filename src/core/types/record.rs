use serde::{Deserialize, Serialize};

/// A single input entry as loaded from the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub age: f64,
    pub name: String,
}

/// The derived output of a transform, paired with the record it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedRecord {
    pub original: Record,
    pub id: i64,
    pub age: f64,
    pub name: String,
}

impl Record {
    #[cfg(test)]
    pub fn new(id: i64, age: f64, name: impl Into<String>) -> Self {
        Self {
            id,
            age,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({:.2})", self.id, self.name, self.age)
    }
}

impl std::fmt::Display for TransformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} ({:.2}) <- {}",
            self.id, self.name, self.age, self.original
        )
    }
}
