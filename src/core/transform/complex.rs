use crate::core::types::{Record, TransformedRecord};

use super::Transform;

const ID_DIVISOR: i64 = 100_000_000;
const AGE_GROWTH: f64 = 3.1425;
const AGE_CEILING: f64 = 10_000.0;
const NAME_SEGMENTS: i64 = 10;
const LETTERS: i64 = 25;

pub const DEFAULT_ROUNDS: u64 = 1_000_000;
pub const DEFAULT_INNER_ROUNDS: u64 = 100;

/// The default CPU-heavy transform. Every derived field is a fixed function
/// of the input record, the cost is governed by the two round counts.
#[derive(Debug, Clone, Copy)]
pub struct ComplexCalculation {
    rounds: u64,
    inner_rounds: u64,
}

impl Default for ComplexCalculation {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS, DEFAULT_INNER_ROUNDS)
    }
}

impl ComplexCalculation {
    pub fn new(rounds: u64, inner_rounds: u64) -> Self {
        Self {
            rounds,
            inner_rounds,
        }
    }

    fn derive_id(&self, id: i64) -> i64 {
        let mut acc: i64 = 0;
        for i in 0..self.rounds as i64 {
            acc = acc.wrapping_add(id.wrapping_mul(i));
            for j in 0..self.inner_rounds as i64 {
                acc = acc.wrapping_add(i.wrapping_mul(j));
            }
        }

        acc / ID_DIVISOR
    }

    fn derive_age(&self, age: f64) -> f64 {
        let mut acc = age;
        for i in 0..self.rounds {
            acc += acc.abs() * AGE_GROWTH;
            for j in 0..self.inner_rounds {
                acc += (i + j) as f64;
            }
            // Restart from the input whenever the value leaves [0, ceiling].
            if acc < 0.0 || acc > AGE_CEILING {
                acc = age;
            }
        }

        acc
    }

    fn derive_name(&self, id: i64, age: f64) -> String {
        let mut name = String::with_capacity(NAME_SEGMENTS as usize * 3);
        for i in 0..NAME_SEGMENTS {
            name.push(letter(id.wrapping_add(i).rem_euclid(LETTERS)));
            for j in 0..2 {
                let seed = (age + (i * j) as f64).rem_euclid(LETTERS as f64);
                name.push(letter(seed as i64));
            }
        }

        name
    }
}

fn letter(offset: i64) -> char {
    (b'A' + offset.clamp(0, LETTERS) as u8) as char
}

impl Transform for ComplexCalculation {
    fn apply(&self, record: Record) -> TransformedRecord {
        let id = self.derive_id(record.id);
        let age = self.derive_age(record.age);
        let name = self.derive_name(record.id, record.age);

        TransformedRecord {
            original: record,
            id,
            age,
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> ComplexCalculation {
        ComplexCalculation::new(1_000, 10)
    }

    #[test]
    fn test_deterministic() {
        let transform = cheap();
        let record = Record::new(42, -3.5, "Grace");

        let a = transform.apply(record.clone());
        let b = transform.apply(record.clone());

        assert_eq!(a.id, b.id);
        assert_eq!(a.age.to_bits(), b.age.to_bits());
        assert_eq!(a.name, b.name);
        assert_eq!(a.original, record);
    }

    #[test]
    fn test_name_shape() {
        let out = cheap().apply(Record::new(-17, 12.25, "Linus"));

        assert_eq!(out.name.len(), 30);
        assert!(out.name.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_zero_rounds_keeps_age() {
        let out = ComplexCalculation::new(0, 0).apply(Record::new(3, -2.0, "x"));

        assert_eq!(out.id, 0);
        assert_eq!(out.age, -2.0);
    }

    #[test]
    fn test_age_stays_bounded() {
        let out = cheap().apply(Record::new(1, 9_999.0, "x"));

        assert!(out.age <= AGE_CEILING);
    }
}
