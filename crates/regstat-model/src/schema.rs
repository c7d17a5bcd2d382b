//! Column layout of a regional statistics table.
//!
//! A source row looks like
//!
//! ```text
//! <region>;<reserved>;<cases 1>;<rate 1>;<cases 2>;<rate 2>;...
//! ```
//!
//! The schema binds each disease name to the offset of its (count, rate)
//! pair. It is versioned so a table whose layout changed can be rejected
//! or flagged instead of being read with shifted columns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Tag every column schema document must carry.
pub const SCHEMA_TAG: &str = "regstat.column-schema";

/// Highest schema document version this crate understands.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaHeader {
    pub schema: String,
    pub schema_version: u32,
}

impl Default for SchemaHeader {
    fn default() -> Self {
        Self {
            schema: SCHEMA_TAG.to_string(),
            schema_version: SCHEMA_VERSION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Short identifier of the table family, e.g. `congenital-anomalies`.
    pub name: String,
    /// Leading non-blank lines to discard before data rows.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    #[serde(default)]
    pub region_column: usize,
    #[serde(default = "default_first_disease_column")]
    pub first_disease_column: usize,
    /// Disease names in column order.
    pub diseases: Vec<String>,
    pub schema: SchemaHeader,
}

fn default_header_rows() -> usize {
    2
}

fn default_first_disease_column() -> usize {
    2
}

impl ColumnSchema {
    /// Builds a schema with the standard layout (two header rows, region in
    /// column 0, first disease pair at column 2).
    pub fn new<I, S>(name: impl Into<String>, diseases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            header_rows: default_header_rows(),
            region_column: 0,
            first_disease_column: default_first_disease_column(),
            diseases: diseases.into_iter().map(Into::into).collect(),
            schema: SchemaHeader::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema.schema != SCHEMA_TAG {
            return Err(ModelError::SchemaTag {
                expected: SCHEMA_TAG.to_string(),
                found: self.schema.schema.clone(),
            });
        }
        if self.schema.schema_version == 0 || self.schema.schema_version > SCHEMA_VERSION {
            return Err(ModelError::SchemaVersion {
                supported: SCHEMA_VERSION,
                found: self.schema.schema_version,
            });
        }
        if self.diseases.is_empty() {
            return Err(ModelError::NoDiseases(self.name.clone()));
        }
        if self.first_disease_column <= self.region_column {
            return Err(ModelError::ColumnOverlap {
                region_column: self.region_column,
                first_disease_column: self.first_disease_column,
            });
        }
        let mut seen = BTreeSet::new();
        for (idx, disease) in self.diseases.iter().enumerate() {
            if disease.trim().is_empty() {
                return Err(ModelError::BlankDisease(idx));
            }
            if !seen.insert(disease.as_str()) {
                return Err(ModelError::DuplicateDisease(disease.clone()));
            }
        }
        Ok(())
    }

    /// Column holding the absolute count for the disease at `index`.
    pub fn count_column(&self, index: usize) -> usize {
        self.first_disease_column + index * 2
    }

    /// Column holding the rate for the disease at `index`.
    pub fn rate_column(&self, index: usize) -> usize {
        self.count_column(index) + 1
    }

    /// Number of fields in a complete row.
    pub fn expected_width(&self) -> usize {
        self.first_disease_column + self.diseases.len() * 2
    }
}
