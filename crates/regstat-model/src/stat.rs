//! Per-disease statistics for a single region.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Counts for one condition in one region.
///
/// `cases` is the rounded absolute count and `rate` the per-population rate.
/// Both are non-negative; the constructor clamps anything else to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiseaseStat {
    cases: u64,
    rate: f64,
}

impl DiseaseStat {
    pub fn new(cases: u64, rate: f64) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            0.0
        };
        Self { cases, rate }
    }

    pub fn cases(&self) -> u64 {
        self.cases
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// Disease statistics in source column order.
///
/// Behaves like an ordered map keyed by disease name: inserting a name that
/// is already present replaces the value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    entries: Vec<(String, DiseaseStat)>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry, returning the previous value if any.
    pub fn insert(&mut self, disease: impl Into<String>, stat: DiseaseStat) -> Option<DiseaseStat> {
        let disease = disease.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(name, _)| *name == disease) {
            return Some(std::mem::replace(existing, stat));
        }
        self.entries.push((disease, stat));
        None
    }

    pub fn get(&self, disease: &str) -> Option<&DiseaseStat> {
        self.entries
            .iter()
            .find(|(name, _)| name == disease)
            .map(|(_, stat)| stat)
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.get(disease).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiseaseStat)> {
        self.entries.iter().map(|(name, stat)| (name.as_str(), stat))
    }

    pub fn diseases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Sum of `cases` across all entries, saturating at `u64::MAX`.
    pub fn total_cases(&self) -> u64 {
        self.entries
            .iter()
            .fold(0, |total, (_, stat)| total.saturating_add(stat.cases))
    }
}

impl FromIterator<(String, DiseaseStat)> for Statistics {
    fn from_iter<I: IntoIterator<Item = (String, DiseaseStat)>>(iter: I) -> Self {
        let mut stats = Statistics::new();
        for (disease, stat) in iter {
            stats.insert(disease, stat);
        }
        stats
    }
}

impl Serialize for Statistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, stat) in &self.entries {
            map.serialize_entry(name, stat)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_and_non_finite_rates_clamp_to_zero() {
        assert_eq!(DiseaseStat::new(3, -1.5).rate(), 0.0);
        assert_eq!(DiseaseStat::new(3, f64::NAN).rate(), 0.0);
        assert_eq!(DiseaseStat::new(3, f64::INFINITY).rate(), 0.0);
        assert_eq!(DiseaseStat::new(3, 45.2).rate(), 45.2);
    }

    #[test]
    fn insert_keeps_first_position_on_replace() {
        let mut stats = Statistics::new();
        stats.insert("a", DiseaseStat::new(1, 0.0));
        stats.insert("b", DiseaseStat::new(2, 0.0));
        let previous = stats.insert("a", DiseaseStat::new(7, 0.0));

        assert_eq!(previous, Some(DiseaseStat::new(1, 0.0)));
        assert_eq!(stats.diseases().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(stats.get("a").map(DiseaseStat::cases), Some(7));
        assert_eq!(stats.total_cases(), 9);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let stats: Statistics = vec![
            ("zeta".to_string(), DiseaseStat::new(2, 1.5)),
            ("alpha".to_string(), DiseaseStat::new(1, 0.0)),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&stats).expect("serialize statistics");
        assert_eq!(
            json,
            r#"{"zeta":{"cases":2,"rate":1.5},"alpha":{"cases":1,"rate":0.0}}"#
        );
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let stats: Statistics = [
            ("a".to_string(), DiseaseStat::new(u64::MAX, 1.0)),
            ("b".to_string(), DiseaseStat::new(u64::MAX, 1.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(stats.total_cases(), u64::MAX);
    }
}
