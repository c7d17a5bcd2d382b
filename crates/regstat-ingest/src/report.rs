use serde::Serialize;

use regstat_model::ColumnSchema;

use crate::parser::SkipReason;

/// What a parse saw and dropped. Nothing here is an error; the counts let a
/// caller tell an empty table from a table whose rows were all filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Non-blank lines in the input, header lines included.
    pub lines: usize,
    pub header_lines_skipped: usize,
    /// Data rows handed to the row reader.
    pub rows_seen: usize,
    /// Distinct region names in the result.
    pub regions_emitted: usize,
    pub skipped_aggregate: usize,
    pub skipped_unnamed: usize,
    pub skipped_short: usize,
    pub skipped_empty: usize,
    pub skipped_unreadable: usize,
    /// Names that appeared on more than one row; the last row won.
    pub duplicates: Vec<String>,
    /// Field count of the widest data row.
    pub widest_row: usize,
}

/// Data rows are wider than the schema accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaDrift {
    pub expected: usize,
    pub widest: usize,
}

impl IngestReport {
    pub(crate) fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::TooFewColumns => self.skipped_short += 1,
            SkipReason::Unnamed => self.skipped_unnamed += 1,
            SkipReason::FederalDistrict | SkipReason::NationalTotal => {
                self.skipped_aggregate += 1;
            }
            SkipReason::NoStatistics => self.skipped_empty += 1,
            SkipReason::Unreadable => self.skipped_unreadable += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_aggregate
            + self.skipped_unnamed
            + self.skipped_short
            + self.skipped_empty
            + self.skipped_unreadable
    }

    /// Reports rows carrying more columns than `schema` reads, which usually
    /// means diseases were added to the source table.
    pub fn schema_drift(&self, schema: &ColumnSchema) -> Option<SchemaDrift> {
        let expected = schema.expected_width();
        (self.widest_row > expected).then_some(SchemaDrift {
            expected,
            widest: self.widest_row,
        })
    }
}
