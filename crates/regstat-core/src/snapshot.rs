use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info, warn};

use regstat_ingest::{Ingested, IngestReport, parse_with_schema};
use regstat_model::{ColumnSchema, RegionRecord};
use regstat_standards::RegionRegistry;

use crate::scale::{Rgb, color_for};

/// Lower bound used when no region has any cases.
pub const DEFAULT_MIN_CASES: u64 = 0;

/// Upper bound used when no region has any cases.
pub const DEFAULT_MAX_CASES: u64 = 40_000;

/// How source labels become canonical keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyResolution {
    /// Exact lookup in the alias table, otherwise the label itself.
    #[default]
    AliasTable,
    /// Any registry name (key, display name, source label), otherwise the
    /// label itself.
    Registry,
}

impl KeyResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyResolution::AliasTable => "alias-table",
            KeyResolution::Registry => "registry",
        }
    }

    pub fn resolve(&self, registry: &RegionRegistry, label: &str) -> String {
        match self {
            KeyResolution::AliasTable => registry.key_map().resolve(label),
            KeyResolution::Registry => registry
                .resolve_strict(label)
                .map(|identity| identity.key.clone())
                .unwrap_or_else(|_| label.to_string()),
        }
    }
}

impl fmt::Display for KeyResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alias-table" | "alias" => Ok(KeyResolution::AliasTable),
            "registry" => Ok(KeyResolution::Registry),
            _ => Err(format!("Unknown key resolution: {s}")),
        }
    }
}

/// Color-scale bounds: smallest and largest positive region total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaseBounds {
    pub min: u64,
    pub max: u64,
}

impl Default for CaseBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_CASES,
            max: DEFAULT_MAX_CASES,
        }
    }
}

impl CaseBounds {
    /// Bounds over the positive totals; defaults when there are none.
    pub fn from_totals<I: IntoIterator<Item = u64>>(totals: I) -> Self {
        let mut bounds: Option<(u64, u64)> = None;
        for total in totals.into_iter().filter(|&total| total > 0) {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(total), max.max(total)),
                None => (total, total),
            });
        }
        bounds
            .map(|(min, max)| Self { min, max })
            .unwrap_or_default()
    }
}

/// The result of one parse, keyed by canonical region key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSnapshot {
    resolution: KeyResolution,
    regions: BTreeMap<String, RegionRecord>,
    bounds: CaseBounds,
    /// Keys that match no registry region and will not join with geometry.
    unresolved: Vec<String>,
    /// Keys reached from more than one source label; the later row won.
    collisions: Vec<String>,
    report: IngestReport,
}

impl DatasetSnapshot {
    /// Resolves every source label to a key. Labels are visited in source
    /// row order, so when two labels share a key the later row wins.
    pub fn build(
        mut ingested: Ingested,
        registry: &RegionRegistry,
        resolution: KeyResolution,
    ) -> Self {
        let report = std::mem::take(&mut ingested.report);
        let mut regions = BTreeMap::new();
        let mut collisions = Vec::new();
        for (label, record) in ingested.into_rows() {
            let key = resolution.resolve(registry, &label);
            debug!(label = %label, key = %key, "resolved region key");
            if regions.insert(key.clone(), record).is_some() {
                warn!(key = %key, label = %label, "several source labels share a key, keeping the last one");
                collisions.push(key);
            }
        }
        let unresolved: Vec<String> = regions
            .keys()
            .filter(|key| !registry.is_canonical_key(key))
            .cloned()
            .collect();
        for key in &unresolved {
            warn!(key = %key, "region key matches no known region");
        }
        let bounds = CaseBounds::from_totals(regions.values().map(RegionRecord::total_cases));
        info!(
            regions = regions.len(),
            unresolved = unresolved.len(),
            min = bounds.min,
            max = bounds.max,
            resolution = %resolution,
            "built dataset snapshot"
        );
        Self {
            resolution,
            regions,
            bounds,
            unresolved,
            collisions,
            report,
        }
    }

    /// Parses `raw` and builds a snapshot in one step.
    pub fn from_text(
        raw: &str,
        schema: &ColumnSchema,
        registry: &RegionRegistry,
        resolution: KeyResolution,
    ) -> Self {
        Self::build(parse_with_schema(raw, schema), registry, resolution)
    }

    pub fn resolution(&self) -> KeyResolution {
        self.resolution
    }

    pub fn regions(&self) -> &BTreeMap<String, RegionRecord> {
        &self.regions
    }

    pub fn get(&self, key: &str) -> Option<&RegionRecord> {
        self.regions.get(key)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn bounds(&self) -> CaseBounds {
        self.bounds
    }

    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    /// Fill color for a map feature; keys without data get the no-data color.
    pub fn color_of(&self, key: &str) -> Rgb {
        let total = self.get(key).map_or(0, RegionRecord::total_cases);
        color_for(total, self.bounds)
    }
}

/// Label for a key: its display name when known, otherwise the key itself.
pub fn display_label<'a>(registry: &'a RegionRegistry, key: &'a str) -> &'a str {
    registry.display_name(key).unwrap_or(key)
}
