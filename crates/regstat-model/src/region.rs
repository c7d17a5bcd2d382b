use serde::Serialize;

use crate::stat::{DiseaseStat, Statistics};

/// One region's statistics as read from a single source row.
///
/// `total_cases` is kept in step with `statistics`: it is computed on
/// construction and after every mutation, never set directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecord {
    name: String,
    statistics: Statistics,
    total_cases: u64,
}

/// A disease's share of a region's total case count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseShare {
    pub disease: String,
    pub cases: u64,
    /// Percentage of the region total, `0.0` when the total is zero.
    pub percent: f64,
}

impl RegionRecord {
    pub fn new(name: impl Into<String>, statistics: Statistics) -> Self {
        let total_cases = statistics.total_cases();
        Self {
            name: name.into(),
            statistics,
            total_cases,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn total_cases(&self) -> u64 {
        self.total_cases
    }

    pub fn stat(&self, disease: &str) -> Option<&DiseaseStat> {
        self.statistics.get(disease)
    }

    pub fn insert_stat(&mut self, disease: impl Into<String>, stat: DiseaseStat) {
        self.statistics.insert(disease, stat);
        self.total_cases = self.statistics.total_cases();
    }

    /// Per-disease shares in column order, for detail panels and bar charts.
    pub fn shares(&self) -> Vec<DiseaseShare> {
        let total = self.total_cases;
        self.statistics
            .iter()
            .map(|(disease, stat)| DiseaseShare {
                disease: disease.to_string(),
                cases: stat.cases(),
                percent: if total == 0 {
                    0.0
                } else {
                    stat.cases() as f64 / total as f64 * 100.0
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RegionRecord {
        let mut stats = Statistics::new();
        stats.insert("first", DiseaseStat::new(30, 1.0));
        stats.insert("second", DiseaseStat::new(10, 2.0));
        RegionRecord::new("Тверская область", stats)
    }

    #[test]
    fn total_tracks_mutation() {
        let mut record = record();
        assert_eq!(record.total_cases(), 40);
        record.insert_stat("third", DiseaseStat::new(5, 0.0));
        assert_eq!(record.total_cases(), 45);
        record.insert_stat("first", DiseaseStat::new(0, 0.0));
        assert_eq!(record.total_cases(), 15);
    }

    #[test]
    fn shares_are_percent_of_total() {
        let shares = record().shares();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].disease, "first");
        assert!((shares[0].percent - 75.0).abs() < 1e-9);
        assert!((shares[1].percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn shares_of_empty_total_are_zero() {
        let mut stats = Statistics::new();
        stats.insert("only", DiseaseStat::new(0, 3.0));
        let record = RegionRecord::new("Тыва", stats);
        assert_eq!(record.shares()[0].percent, 0.0);
    }

    #[test]
    fn record_serializes_in_column_order() {
        let json = serde_json::to_value(record()).expect("serialize record");
        insta::assert_json_snapshot!(json, @r#"
        {
          "name": "Тверская область",
          "statistics": {
            "first": {
              "cases": 30,
              "rate": 1.0
            },
            "second": {
              "cases": 10,
              "rate": 2.0
            }
          },
          "total_cases": 40
        }
        "#);
    }
}
