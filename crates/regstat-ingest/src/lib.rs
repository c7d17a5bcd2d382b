#![deny(unsafe_code)]

pub mod decimal;
pub mod filter;
pub mod parser;
pub mod report;

pub use decimal::{normalize_decimal, parse_count, parse_decimal, parse_rate};
pub use filter::{FEDERAL_DISTRICT_MARKER, NATIONAL_TOTAL_LABEL, RowKind, classify_region_name};
pub use parser::{Ingested, RegionTable, SkipReason, parse, parse_with_schema, read_row};
pub use report::{IngestReport, SchemaDrift};
