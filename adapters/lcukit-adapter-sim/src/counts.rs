//! Measurement outcome histograms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Shot counts keyed by bitstring, classical bit 0 rightmost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: BTreeMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, n: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += n;
    }

    /// Count for a bitstring; zero if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Outcomes in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The most frequent outcome; ties go to the smaller bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter().fold(None, |best, (k, v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((k, v)),
        })
    }

    /// Relative frequency of each outcome.
    pub fn frequencies(&self) -> BTreeMap<String, f64> {
        let total = self.total();
        if total == 0 {
            return BTreeMap::new();
        }
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("11", 5);
        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("00"), 0);
        assert_eq!(counts.total(), 10);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent_tie() {
        let mut counts = Counts::new();
        counts.insert("10", 4);
        counts.insert("01", 4);
        assert_eq!(counts.most_frequent(), Some(("01", 4)));
        assert_eq!(Counts::new().most_frequent(), None);
    }

    #[test]
    fn test_serialize_as_map() {
        let mut counts = Counts::new();
        counts.insert("1", 2);
        assert_eq!(serde_json::to_string(&counts).unwrap(), r#"{"1":2}"#);
        assert!((counts.frequencies()["1"] - 1.0).abs() < 1e-12);
    }
}
