use std::path::PathBuf;

use regstat_core::{DatasetSnapshot, JoinReport};
use regstat_ingest::SchemaDrift;
use regstat_model::ColumnSchema;
use regstat_standards::RegionRegistry;

/// Everything `parse` produced, with the reference data it used.
#[derive(Debug)]
pub struct ParseResult {
    pub csv: PathBuf,
    pub schema: ColumnSchema,
    pub registry: RegionRegistry,
    pub snapshot: DatasetSnapshot,
    pub drift: Option<SchemaDrift>,
}

impl ParseResult {
    /// The table produced no regions; callers surface this to the user.
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

#[derive(Debug)]
pub struct JoinResult {
    pub parse: ParseResult,
    pub geometry: PathBuf,
    pub property: String,
    pub features: usize,
    /// Features without a string value for the name property.
    pub unnamed_features: usize,
    pub report: JoinReport,
}
