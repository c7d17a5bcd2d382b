use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use regstat_core::{DatasetSnapshot, GeometryIndex, KeyResolution};
use regstat_model::ColumnSchema;
use regstat_standards::paths::{regions_override, schema_override};
use regstat_standards::{
    RegionRegistry, load_column_schema, try_default_column_schema,
};

use crate::cli::{JoinArgs, ParseArgs, RegionsArgs, SchemaArgs, SourceArgs};
use crate::types::{JoinResult, ParseResult};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Column schema from `explicit`, then `$REGSTAT_SCHEMA`, then the built-in one.
pub fn load_schema(explicit: Option<&Path>) -> Result<ColumnSchema> {
    match pick_source(explicit, schema_override()) {
        Some(path) => {
            debug!(path = %path.display(), "loading column schema");
            load_column_schema(&path)
                .with_context(|| format!("load column schema {}", path.display()))
        }
        None => try_default_column_schema().context("load built-in column schema"),
    }
}

/// Region table from `explicit`, then `$REGSTAT_REGIONS`, then the built-in one.
pub fn load_registry(explicit: Option<&Path>) -> Result<RegionRegistry> {
    match pick_source(explicit, regions_override()) {
        Some(path) => {
            debug!(path = %path.display(), "loading region table");
            RegionRegistry::load(&path)
                .with_context(|| format!("load region table {}", path.display()))
        }
        None => RegionRegistry::try_embedded().context("load built-in region table"),
    }
}

fn pick_source(explicit: Option<&Path>, env: Option<PathBuf>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or(env)
}

/// Reads a source table as UTF-8 text, dropping a leading byte order mark.
pub fn read_table(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not UTF-8 text", path.display()))?;
    Ok(match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

pub fn run_parse(args: &ParseArgs) -> Result<ParseResult> {
    parse_table(&args.csv, &args.source)
}

pub fn run_join(args: &JoinArgs) -> Result<JoinResult> {
    let parse = parse_table(&args.csv, &args.source)?;
    let span = info_span!("join", geometry = %args.geometry.display(), property = %args.property);
    let _guard = span.enter();
    let text = std::fs::read_to_string(&args.geometry)
        .with_context(|| format!("read {}", args.geometry.display()))?;
    let index = GeometryIndex::from_geojson(&text, &args.property)
        .with_context(|| format!("read features from {}", args.geometry.display()))?;
    let report = index.join(&parse.snapshot);
    if !report.is_complete() {
        warn!(
            missing = report.data_without_geometry.len(),
            "regions without a matching map feature"
        );
    }
    info!(
        matched = report.matched.len(),
        features = index.len(),
        "joined snapshot to geometry"
    );
    Ok(JoinResult {
        geometry: args.geometry.clone(),
        property: args.property.clone(),
        features: index.len(),
        unnamed_features: index.unnamed(),
        report,
        parse,
    })
}

pub fn run_regions(args: &RegionsArgs) -> Result<RegionRegistry> {
    load_registry(args.regions.as_deref())
}

pub fn run_schema(args: &SchemaArgs) -> Result<ColumnSchema> {
    load_schema(args.schema.as_deref())
}

fn parse_table(csv: &Path, source: &SourceArgs) -> Result<ParseResult> {
    let span = info_span!("parse", csv = %csv.display());
    let _guard = span.enter();
    let schema = load_schema(source.schema.as_deref())?;
    let registry = load_registry(source.regions.as_deref())?;
    let raw = read_table(csv)?;
    let resolution = KeyResolution::from(source.resolution);
    let snapshot = DatasetSnapshot::from_text(&raw, &schema, &registry, resolution);
    let drift = snapshot.report().schema_drift(&schema);
    if snapshot.is_empty() {
        warn!(
            rows = snapshot.report().rows_seen,
            skipped = snapshot.report().skipped(),
            "table produced no regions"
        );
    }
    Ok(ParseResult {
        csv: csv.to_path_buf(),
        schema,
        registry,
        snapshot,
        drift,
    })
}
