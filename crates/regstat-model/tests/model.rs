//! Tests for regstat-model types.

use proptest::prelude::*;

use regstat_model::{DiseaseStat, RegionRecord, Statistics};

fn stats_strategy() -> impl Strategy<Value = Vec<(String, u64, f64)>> {
    prop::collection::vec(("[a-e]{1,3}", 0u64..1_000_000, 0.0f64..10_000.0), 0..12)
}

proptest! {
    #[test]
    fn total_cases_equals_sum_of_cases(entries in stats_strategy()) {
        let statistics: Statistics = entries
            .iter()
            .map(|(name, cases, rate)| (name.clone(), DiseaseStat::new(*cases, *rate)))
            .collect();
        let record = RegionRecord::new("region", statistics);

        let recomputed: u64 = record.statistics().iter().map(|(_, stat)| stat.cases()).sum();
        prop_assert_eq!(record.total_cases(), recomputed);
    }

    #[test]
    fn statistics_keys_stay_unique(entries in stats_strategy()) {
        let statistics: Statistics = entries
            .iter()
            .map(|(name, cases, rate)| (name.clone(), DiseaseStat::new(*cases, *rate)))
            .collect();

        let mut names: Vec<&str> = statistics.diseases().collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(before, names.len());
    }
}

#[test]
fn stat_lookup_by_disease() {
    let mut record = RegionRecord::new("Псковская область", Statistics::new());
    assert_eq!(record.total_cases(), 0);
    assert!(record.stat("ихтиоз").is_none());

    record.insert_stat("ихтиоз", DiseaseStat::new(4, 0.7));
    let stat = record.stat("ихтиоз").expect("stat present");
    assert_eq!(stat.cases(), 4);
    assert!((stat.rate() - 0.7).abs() < 1e-12);
    assert_eq!(record.total_cases(), 4);
}
