//! Semicolon-delimited regional statistics tables.
//!
//! ```text
//! <header line 1>
//! <header line 2>
//! <region>;<reserved>;<cases 1>;<rate 1>;...;<cases N>;<rate N>
//! ```
//!
//! Parsing never fails. Bad numbers read as zero, unusable rows are skipped
//! and counted in the [`IngestReport`], and unusable input yields an empty
//! table.

use std::collections::BTreeMap;

use csv::{ReaderBuilder, Terminator, Trim};
use tracing::{debug, info, info_span, warn};

use regstat_model::{ColumnSchema, DiseaseStat, RegionRecord, Statistics};
use regstat_standards::default_column_schema;

use crate::decimal::{parse_count, parse_rate};
use crate::filter::{RowKind, classify_region_name};
use crate::report::IngestReport;

/// Region records keyed by the region name exactly as written in the source.
pub type RegionTable = BTreeMap<String, RegionRecord>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingested {
    pub regions: RegionTable,
    /// Region names ordered by the row each record was read from.
    pub row_order: Vec<String>,
    pub report: IngestReport,
}

impl Ingested {
    /// Records in source row order, so later rows come after earlier ones.
    pub fn into_rows(self) -> impl Iterator<Item = (String, RegionRecord)> {
        let mut regions = self.regions;
        self.row_order
            .into_iter()
            .filter_map(move |name| regions.remove_entry(&name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooFewColumns,
    Unnamed,
    FederalDistrict,
    NationalTotal,
    /// The row is too short to hold even the first disease.
    NoStatistics,
    Unreadable,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::TooFewColumns => "too few columns",
            SkipReason::Unnamed => "empty region name",
            SkipReason::FederalDistrict => "federal district subtotal",
            SkipReason::NationalTotal => "national total",
            SkipReason::NoStatistics => "no disease columns",
            SkipReason::Unreadable => "unreadable record",
        }
    }
}

/// Parses `raw` with the embedded default column schema.
pub fn parse(raw: &str) -> RegionTable {
    match default_column_schema() {
        Some(schema) => parse_with_schema(raw, schema).regions,
        None => RegionTable::new(),
    }
}

pub fn parse_with_schema(raw: &str, schema: &ColumnSchema) -> Ingested {
    let span = info_span!("ingest", schema = %schema.name);
    let _guard = span.enter();

    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect();
    let mut report = IngestReport {
        lines: lines.len(),
        header_lines_skipped: lines.len().min(schema.header_rows),
        ..IngestReport::default()
    };
    let body = lines[report.header_lines_skipped..].join("\n");

    // One line is one record: quotes and a stray `\r` are literal text.
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut regions = RegionTable::new();
    let mut row_order: Vec<String> = Vec::new();
    for (row_index, record) in reader.records().enumerate() {
        report.rows_seen += 1;
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                debug!(row = row_index, %error, "skipping unreadable record");
                report.record_skip(SkipReason::Unreadable);
                continue;
            }
        };
        report.widest_row = report.widest_row.max(record.len());
        let fields: Vec<&str> = record.iter().collect();
        match read_row(&fields, schema) {
            Ok(region) => {
                let name = region.name().to_string();
                if regions.insert(name.clone(), region).is_some() {
                    warn!(region = %name, "duplicate region row, keeping the last one");
                    row_order.retain(|seen| seen != &name);
                    report.duplicates.push(name.clone());
                }
                row_order.push(name);
            }
            Err(reason) => {
                debug!(
                    row = row_index,
                    region = fields.get(schema.region_column).copied().unwrap_or(""),
                    reason = reason.as_str(),
                    "skipping row"
                );
                report.record_skip(reason);
            }
        }
    }
    report.regions_emitted = regions.len();

    if let Some(drift) = report.schema_drift(schema) {
        warn!(
            expected = drift.expected,
            widest = drift.widest,
            "rows are wider than the column schema; extra columns are ignored"
        );
    }
    info!(
        regions = report.regions_emitted,
        rows = report.rows_seen,
        skipped = report.skipped(),
        "parsed regional statistics"
    );
    Ingested {
        regions,
        row_order,
        report,
    }
}

/// Reads one data row (already split and trimmed) into a region record.
///
/// A disease is included when its count column exists; a missing rate
/// column reads as zero. Diseases past the end of the row are omitted.
pub fn read_row(fields: &[&str], schema: &ColumnSchema) -> Result<RegionRecord, SkipReason> {
    if fields.len() < 2 || fields.len() <= schema.region_column {
        return Err(SkipReason::TooFewColumns);
    }
    let name = fields[schema.region_column];
    match classify_region_name(name) {
        RowKind::Region => {}
        RowKind::Unnamed => return Err(SkipReason::Unnamed),
        RowKind::FederalDistrict => return Err(SkipReason::FederalDistrict),
        RowKind::NationalTotal => return Err(SkipReason::NationalTotal),
    }

    let mut statistics = Statistics::new();
    for (index, disease) in schema.diseases.iter().enumerate() {
        let Some(count) = fields.get(schema.count_column(index)) else {
            break;
        };
        let rate = fields.get(schema.rate_column(index)).copied().unwrap_or("");
        statistics.insert(
            disease.clone(),
            DiseaseStat::new(parse_count(count), parse_rate(rate)),
        );
    }
    if statistics.is_empty() {
        return Err(SkipReason::NoStatistics);
    }
    Ok(RegionRecord::new(name, statistics))
}
