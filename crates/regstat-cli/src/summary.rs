use std::collections::BTreeMap;

use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use regstat_core::{DatasetSnapshot, Rgb, display_label};
use regstat_ingest::IngestReport;
use regstat_model::ColumnSchema;
use regstat_standards::RegionRegistry;

use crate::types::{JoinResult, ParseResult};

/// Machine-readable form of a parse: the snapshot plus what a map needs to
/// draw it.
#[derive(Serialize)]
pub struct ParseDocument<'a> {
    pub source: String,
    pub schema: &'a str,
    #[serde(flatten)]
    pub snapshot: &'a DatasetSnapshot,
    /// Fill color per region key.
    pub colors: BTreeMap<&'a str, String>,
    pub display_names: BTreeMap<&'a str, &'a str>,
}

impl<'a> ParseDocument<'a> {
    pub fn new(result: &'a ParseResult) -> Self {
        let snapshot = &result.snapshot;
        Self {
            source: result.csv.display().to_string(),
            schema: &result.schema.name,
            snapshot,
            colors: snapshot
                .regions()
                .keys()
                .map(|key| (key.as_str(), snapshot.color_of(key).to_hex()))
                .collect(),
            display_names: result.registry.display_names(),
        }
    }
}

pub fn print_parse_json(result: &ParseResult) -> Result<()> {
    let json = serde_json::to_string_pretty(&ParseDocument::new(result))
        .context("serialize parse result")?;
    println!("{json}");
    Ok(())
}

pub fn print_parse(result: &ParseResult) {
    let snapshot = &result.snapshot;
    println!("Source: {}", result.csv.display());
    println!(
        "Schema: {} (v{}, {} diseases)",
        result.schema.name,
        result.schema.schema.schema_version,
        result.schema.diseases.len()
    );
    println!("Key resolution: {}", snapshot.resolution());
    println!(
        "Case bounds: {} - {}",
        snapshot.bounds().min,
        snapshot.bounds().max
    );
    println!("{}", region_table(result));
    println!();
    println!("Ingest:");
    println!("{}", report_table(snapshot.report()));
    print_warnings(result);
}

fn print_warnings(result: &ParseResult) {
    let snapshot = &result.snapshot;
    if let Some(drift) = result.drift {
        eprintln!(
            "warning: rows have up to {} columns but schema {} reads {}",
            drift.widest, result.schema.name, drift.expected
        );
    }
    if !snapshot.unresolved().is_empty() {
        eprintln!("Unresolved region keys (no map feature will match):");
        for key in snapshot.unresolved() {
            eprintln!("- {key}");
        }
    }
    if !snapshot.collisions().is_empty() {
        eprintln!("Keys reached from several source rows (last row kept):");
        for key in snapshot.collisions() {
            eprintln!("- {key}");
        }
    }
    if !snapshot.report().duplicates.is_empty() {
        eprintln!("Duplicate source rows (last row kept):");
        for name in &snapshot.report().duplicates {
            eprintln!("- {name}");
        }
    }
}

pub fn region_table(result: &ParseResult) -> Table {
    let snapshot = &result.snapshot;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Region"),
        header_cell("Total"),
        header_cell("Diseases"),
        header_cell("Color"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    let mut total_cases = 0u64;
    for (key, record) in snapshot.regions() {
        total_cases = total_cases.saturating_add(record.total_cases());
        let unresolved = snapshot.unresolved().contains(key);
        table.add_row(vec![
            key_cell(key, unresolved),
            Cell::new(display_label(&result.registry, key)),
            Cell::new(record.total_cases()),
            Cell::new(format!(
                "{}/{}",
                record.statistics().len(),
                result.schema.diseases.len()
            )),
            color_cell(snapshot.color_of(key)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} regions", snapshot.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_cases).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

pub fn report_table(report: &IngestReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Lines", report.lines),
        ("Header lines", report.header_lines_skipped),
        ("Data rows", report.rows_seen),
        ("Regions", report.regions_emitted),
        ("Subtotals skipped", report.skipped_aggregate),
        ("Unnamed skipped", report.skipped_unnamed),
        ("Short skipped", report.skipped_short),
        ("Without statistics", report.skipped_empty),
        ("Unreadable", report.skipped_unreadable),
        ("Duplicates", report.duplicates.len()),
    ];
    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count)]);
    }
    table
}

pub fn print_join(result: &JoinResult) {
    let report = &result.report;
    println!("Source: {}", result.parse.csv.display());
    println!(
        "Geometry: {} ({} features by {}, {} unnamed)",
        result.geometry.display(),
        result.features,
        result.property,
        result.unnamed_features
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("Join"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Matched"), Cell::new(report.matched.len())]);
    table.add_row(vec![
        Cell::new("Data without geometry"),
        warn_count_cell(report.data_without_geometry.len()),
    ]);
    table.add_row(vec![
        Cell::new("Geometry without data"),
        count_cell(report.geometry_without_data.len()),
    ]);
    table.add_row(vec![
        Cell::new("Coverage"),
        Cell::new(format!("{:.1}%", report.coverage() * 100.0)),
    ]);
    println!("{table}");
    if !report.data_without_geometry.is_empty() {
        eprintln!("Regions with data but no map feature:");
        for key in &report.data_without_geometry {
            eprintln!("- {key}");
        }
    }
}

pub fn print_regions(registry: &RegionRegistry) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Region"),
        header_cell("Source labels"),
        header_cell("Alternate keys"),
    ]);
    apply_table_style(&mut table);
    for identity in registry.regions() {
        table.add_row(vec![
            Cell::new(&identity.key)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&identity.display_name),
            list_cell(&identity.source_labels),
            list_cell(&identity.alternate_keys),
        ]);
    }
    println!("{table}");
    println!("{} regions", registry.len());
}

pub fn print_schema(schema: &ColumnSchema) {
    println!(
        "Schema: {} ({} v{})",
        schema.name, schema.schema.schema, schema.schema.schema_version
    );
    println!(
        "Header rows: {}, region column: {}, expected width: {}",
        schema.header_rows,
        schema.region_column,
        schema.expected_width()
    );
    println!("{}", schema_table(schema));
}

pub fn schema_table(schema: &ColumnSchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Disease"),
        header_cell("Cases column"),
        header_cell("Rate column"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (index, disease) in schema.diseases.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(disease),
            Cell::new(schema.count_column(index)),
            Cell::new(schema.rate_column(index)),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn key_cell(key: &str, unresolved: bool) -> Cell {
    if unresolved {
        Cell::new(format!("{key} ?")).fg(Color::Yellow)
    } else {
        Cell::new(key).fg(Color::Blue).add_attribute(Attribute::Bold)
    }
}

fn color_cell(rgb: Rgb) -> Cell {
    Cell::new(rgb.to_hex()).fg(Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    })
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn warn_count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn list_cell(values: &[String]) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(values.join(", "))
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
