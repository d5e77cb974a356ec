//! Records, frozen datasets, and the generator seam.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::utils::fingerprint_records;

/// One sensitive row: three free-text fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub email: String,
    pub notes: String,
}

impl Record {
    pub fn new(name: impl Into<String>, email: impl Into<String>, notes: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into(), notes: notes.into() }
    }

    /// Fields in column order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.name, &self.email, &self.notes]
    }

    /// Sum of the UTF-8 byte lengths of all fields.
    pub fn text_len(&self) -> usize {
        self.name.len() + self.email.len() + self.notes.len()
    }
}

/// An immutable batch of records shared by every strategy of one batch size.
///
/// Cloning is cheap and never copies the records, so each strategy reads the
/// very same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Arc<[Record]>,
    fingerprint: String,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        let fingerprint = fingerprint_records(&records);
        Self { records: records.into(), fingerprint }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hex SHA-256 over the ordered, length-prefixed field contents.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// True when both datasets share one allocation.
    pub fn same_allocation(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

/// Source of synthetic records. Must return exactly `n` records.
pub trait RecordGenerator {
    fn generate(&mut self, n: usize) -> Vec<Record>;
}

impl<F> RecordGenerator for F
where
    F: FnMut(usize) -> Vec<Record>,
{
    fn generate(&mut self, n: usize) -> Vec<Record> {
        self(n)
    }
}

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Amara", "Kenji", "Sofia", "Mateo", "Aisha", "Lukas", "Priya", "Omar",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Okafor", "Tanaka", "Rossi", "Novak", "Haddad", "Schmidt",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test", "clinic.test"];

const NOTE_WORDS: &[&str] = &[
    "patient", "reports", "mild", "pain", "after", "exercise", "follow", "up", "in", "two",
    "weeks", "blood", "pressure", "stable", "prescribed", "rest", "and", "fluids", "allergy",
    "noted", "history", "of", "asthma", "review", "results", "next", "visit", "no", "change",
];

/// Upper bound on generated note length, in characters.
pub const MAX_NOTE_CHARS: usize = 50;

/// Faker-style generator: person names, matching emails, short notes.
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn note(&mut self) -> String {
        let mut note = String::with_capacity(MAX_NOTE_CHARS);
        loop {
            let word = self.pick(NOTE_WORDS);
            let extra = if note.is_empty() { word.len() } else { word.len() + 1 };
            // Keep room for the trailing period.
            if note.len() + extra + 1 > MAX_NOTE_CHARS {
                break;
            }
            if !note.is_empty() {
                note.push(' ');
            }
            note.push_str(word);
        }
        if let Some(first) = note.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        note.push('.');
        note
    }

    fn record(&mut self) -> Record {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let domain = self.pick(DOMAINS);
        let tag: u16 = self.rng.gen_range(0..1000);
        let email = format!("{}.{}{}@{}", first.to_lowercase(), last.to_lowercase(), tag, domain);
        Record::new(format!("{first} {last}"), email, self.note())
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordGenerator for SyntheticGenerator {
    fn generate(&mut self, n: usize) -> Vec<Record> {
        (0..n).map(|_| self.record()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_generator_is_reproducible() {
        let a = SyntheticGenerator::seeded(7).generate(20);
        let b = SyntheticGenerator::seeded(7).generate(20);
        assert_eq!(a, b);
    }

    #[test]
    fn generator_returns_exact_count_and_bounded_notes() {
        let records = SyntheticGenerator::seeded(1).generate(200);
        assert_eq!(records.len(), 200);
        for r in &records {
            assert!(!r.name.is_empty());
            assert!(r.email.contains('@'));
            assert!(r.notes.len() <= MAX_NOTE_CHARS);
            assert!(r.notes.ends_with('.'));
        }
    }

    #[test]
    fn dataset_clone_shares_records() {
        let ds = Dataset::new(SyntheticGenerator::seeded(3).generate(5));
        let copy = ds.clone();
        assert!(ds.same_allocation(&copy));
        assert_eq!(ds.fingerprint(), copy.fingerprint());
    }
}
