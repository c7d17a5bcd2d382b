//! Region identity registry.
//!
//! Every federal subject is described once, with all of its names: the
//! canonical key used by the map geometry, alternate spellings of that key,
//! the display name, and the exact labels statistics tables use for it.
//! The alias table and the display-name table are both projections of this
//! single registry.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regstat_model::SchemaHeader;
use serde::{Deserialize, Serialize};

use crate::embedded::{EMBEDDED_ORIGIN, REGIONS};
use crate::error::{StandardsError, UnresolvedRegion};
use crate::resolve::RegionKeyMap;

/// Tag every region registry document must carry.
pub const REGISTRY_TAG: &str = "regstat.region-registry";

pub const REGISTRY_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionIdentity {
    /// Canonical key, matching the geometry feature name property.
    pub key: String,
    pub display_name: String,
    /// Other spellings of the key found in geometry datasets.
    #[serde(default)]
    pub alternate_keys: Vec<String>,
    /// Exact source-table labels whose spelling differs from the key.
    #[serde(default)]
    pub source_labels: Vec<String>,
}

impl RegionIdentity {
    /// Every name this identity answers to.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str())
            .chain(self.alternate_keys.iter().map(String::as_str))
            .chain(std::iter::once(self.display_name.as_str()))
            .chain(self.source_labels.iter().map(String::as_str))
    }
}

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    registry: SchemaHeader,
    #[serde(default)]
    regions: Vec<RegionIdentity>,
}

#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: Vec<RegionIdentity>,
    by_key: BTreeMap<String, usize>,
    by_name: BTreeMap<String, usize>,
    key_map: RegionKeyMap,
}

impl RegionRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a registry, rejecting blank fields and names claimed by two
    /// different regions.
    pub fn from_identities(regions: Vec<RegionIdentity>) -> Result<Self, StandardsError> {
        let mut by_key = BTreeMap::new();
        let mut by_name: BTreeMap<String, usize> = BTreeMap::new();
        for (idx, region) in regions.iter().enumerate() {
            if region.key.trim().is_empty() {
                return Err(StandardsError::BlankField {
                    key: region.key.clone(),
                    field: "key",
                });
            }
            if region.display_name.trim().is_empty() {
                return Err(StandardsError::BlankField {
                    key: region.key.clone(),
                    field: "display_name",
                });
            }
            for name in region.names() {
                match by_name.get(name) {
                    Some(&other) if other != idx => {
                        return Err(StandardsError::DuplicateName {
                            name: name.to_string(),
                            first: regions[other].key.clone(),
                            second: region.key.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        by_name.insert(name.to_string(), idx);
                    }
                }
            }
            by_key.insert(region.key.clone(), idx);
            for alternate in &region.alternate_keys {
                by_key.insert(alternate.clone(), idx);
            }
        }
        let key_map = RegionKeyMap::from_pairs(regions.iter().flat_map(|region| {
            region
                .source_labels
                .iter()
                .map(|label| (label.clone(), region.key.clone()))
        }));
        Ok(Self {
            regions,
            by_key,
            by_name,
            key_map,
        })
    }

    pub fn parse(contents: &str, origin: &Path) -> Result<Self, StandardsError> {
        let document: RegistryDocument =
            toml::from_str(contents).map_err(|e| StandardsError::Toml {
                path: origin.to_path_buf(),
                source: e,
            })?;
        if document.registry.schema != REGISTRY_TAG {
            return Err(StandardsError::DocumentTag {
                path: origin.to_path_buf(),
                expected: REGISTRY_TAG.to_string(),
                found: document.registry.schema,
            });
        }
        if document.registry.schema_version == 0
            || document.registry.schema_version > REGISTRY_VERSION
        {
            return Err(StandardsError::DocumentVersion {
                path: origin.to_path_buf(),
                supported: REGISTRY_VERSION,
                found: document.registry.schema_version,
            });
        }
        Self::from_identities(document.regions)
    }

    pub fn load(path: &Path) -> Result<Self, StandardsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        Self::parse(&contents, path)
    }

    pub fn try_embedded() -> Result<Self, StandardsError> {
        Self::parse(REGIONS, Path::new(EMBEDDED_ORIGIN))
    }

    pub fn regions(&self) -> &[RegionIdentity] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Looks up a canonical or alternate key.
    pub fn by_key(&self, key: &str) -> Option<&RegionIdentity> {
        self.by_key.get(key).map(|&idx| &self.regions[idx])
    }

    pub fn is_canonical_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Looks up any name: key, alternate key, display name or source label.
    /// Matching is exact; no case folding or trimming is applied.
    pub fn identify(&self, name: &str) -> Option<&RegionIdentity> {
        self.by_name.get(name).map(|&idx| &self.regions[idx])
    }

    pub fn display_name(&self, key: &str) -> Option<&str> {
        self.by_key(key).map(|region| region.display_name.as_str())
    }

    /// Source label to canonical key, for labels that need translation.
    pub fn key_map(&self) -> &RegionKeyMap {
        &self.key_map
    }

    /// Resolves a source label, failing instead of falling back to the input.
    ///
    /// The alias table is consulted first, then every registry name.
    pub fn resolve_strict(&self, name: &str) -> Result<&RegionIdentity, UnresolvedRegion> {
        let identity = match self.key_map.get(name) {
            Some(key) => self.by_key(key),
            None => self.identify(name),
        };
        identity.ok_or_else(|| UnresolvedRegion {
            name: name.to_string(),
        })
    }

    /// Display-name table keyed by canonical key (alternate keys included).
    pub fn display_names(&self) -> BTreeMap<&str, &str> {
        self.by_key
            .iter()
            .map(|(key, &idx)| (key.as_str(), self.regions[idx].display_name.as_str()))
            .collect()
    }
}

/// The embedded registry, parsed once per process.
///
/// Falls back to an empty registry (after logging) if the embedded document
/// is invalid.
pub fn default_registry() -> &'static RegionRegistry {
    static REGISTRY: OnceLock<RegionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        RegionRegistry::try_embedded().unwrap_or_else(|error| {
            tracing::error!(%error, "embedded region registry is invalid");
            RegionRegistry::empty()
        })
    })
}

/// Display name for a canonical key, from the embedded registry.
pub fn display_name(key: &str) -> Option<&'static str> {
    default_registry().display_name(key)
}
