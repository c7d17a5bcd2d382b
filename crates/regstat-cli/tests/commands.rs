//! Command-level tests over files written to a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use regstat_cli::cli::{
    JoinArgs, OutputArg, ParseArgs, RegionsArgs, ResolutionArg, SchemaArgs, SourceArgs,
};
use regstat_cli::commands::{load_schema, read_table, run_join, run_parse, run_regions, run_schema};
use regstat_cli::summary::ParseDocument;
use regstat_core::KeyResolution;
use regstat_standards::embedded::CONGENITAL_ANOMALIES_V1;

const TABLE: &str = "\
Врожденные аномалии у новорожденных
Регион;Население;абс.;на 1000
Российская Федерация;1;100;1
Республика Карелия;5000;120,0;45,2
Карелия;5000;80;30,0
";

fn temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("regstat_cli_{name}_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn source(dir: &Path, resolution: ResolutionArg) -> SourceArgs {
    SourceArgs {
        schema: Some(write(dir, "schema.toml", CONGENITAL_ANOMALIES_V1)),
        regions: None,
        resolution,
    }
}

fn parse_args(dir: &Path, csv: PathBuf, resolution: ResolutionArg) -> ParseArgs {
    ParseArgs {
        csv,
        source: source(dir, resolution),
        output: OutputArg::Table,
    }
}

#[test]
fn parse_resolves_keys_and_flags_unresolved() {
    let dir = temp_dir("parse");
    let csv = write(&dir, "table.csv", TABLE);
    let result = run_parse(&parse_args(&dir, csv, ResolutionArg::AliasTable)).expect("parse");

    let snapshot = &result.snapshot;
    assert!(!result.is_empty());
    assert_eq!(snapshot.resolution(), KeyResolution::AliasTable);
    assert_eq!(snapshot.get("Karelia").map(|r| r.total_cases()), Some(120));
    assert_eq!(snapshot.get("Карелия").map(|r| r.total_cases()), Some(80));
    assert_eq!(snapshot.unresolved(), ["Карелия".to_string()]);
    assert_eq!(snapshot.report().skipped_aggregate, 1);
    assert!(result.drift.is_none());
}

#[test]
fn registry_resolution_merges_labels() {
    let dir = temp_dir("registry");
    let csv = write(&dir, "table.csv", TABLE);
    let result = run_parse(&parse_args(&dir, csv, ResolutionArg::Registry)).expect("parse");
    assert_eq!(result.snapshot.len(), 1);
    assert!(result.snapshot.unresolved().is_empty());
    assert_eq!(result.snapshot.collisions(), ["Karelia".to_string()]);
}

#[test]
fn header_only_table_is_empty() {
    let dir = temp_dir("empty");
    let csv = write(&dir, "table.csv", "H1\nH2\n");
    let result = run_parse(&parse_args(&dir, csv, ResolutionArg::AliasTable)).expect("parse");
    assert!(result.is_empty());
    assert_eq!(result.snapshot.report().header_lines_skipped, 2);
}

#[test]
fn byte_order_mark_is_dropped() {
    let dir = temp_dir("bom");
    let path = write(&dir, "table.csv", format!("\u{feff}{TABLE}"));
    let text = read_table(&path).expect("read");
    assert!(text.starts_with("Врожденные"));
}

#[test]
fn non_utf8_table_is_an_error() {
    let dir = temp_dir("latin1");
    let path = write(&dir, "table.csv", [0xcf_u8, 0xf0, 0xe8, 0xec, 0xe5, 0xf0, 0xff]);
    let error = read_table(&path).unwrap_err();
    assert!(format!("{error:#}").contains("is not UTF-8 text"));
}

#[test]
fn missing_table_is_an_error() {
    let dir = temp_dir("missing");
    let args = parse_args(&dir, dir.join("absent.csv"), ResolutionArg::AliasTable);
    let error = run_parse(&args).unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
}

#[test]
fn custom_schema_reports_drift() {
    let dir = temp_dir("drift");
    let schema = write(
        &dir,
        "narrow.toml",
        r#"
name = "narrow"
diseases = ["Врожденный ихтиоз"]

[schema]
schema = "regstat.column-schema"
schema_version = 1
"#,
    );
    let csv = write(&dir, "table.csv", "H1\nH2\nРеспублика Коми;1;7;0,5;2;0,1\n");
    let args = ParseArgs {
        csv,
        source: SourceArgs {
            schema: Some(schema),
            regions: None,
            resolution: ResolutionArg::AliasTable,
        },
        output: OutputArg::Json,
    };
    let result = run_parse(&args).expect("parse");
    let drift = result.drift.expect("drift");
    assert_eq!(drift.expected, 4);
    assert_eq!(drift.widest, 6);
    assert_eq!(result.snapshot.get("Komi").map(|r| r.total_cases()), Some(7));
}

#[test]
fn invalid_schema_names_the_file() {
    let dir = temp_dir("bad_schema");
    let schema = write(
        &dir,
        "bad.toml",
        r#"
name = "bad"
diseases = ["x"]

[schema]
schema = "something.else"
schema_version = 1
"#,
    );
    let error = load_schema(Some(&schema)).unwrap_err();
    assert!(format!("{error:#}").contains("bad.toml"));
}

#[test]
fn schema_command_reads_explicit_file() {
    let dir = temp_dir("schema");
    let path = write(&dir, "schema.toml", CONGENITAL_ANOMALIES_V1);
    let schema = run_schema(&SchemaArgs { schema: Some(path) }).expect("schema");
    assert_eq!(schema.name, "congenital-anomalies");
    assert_eq!(schema.diseases.len(), 6);
}

#[test]
fn regions_command_reads_explicit_file() {
    let dir = temp_dir("regions");
    let path = write(
        &dir,
        "regions.toml",
        r#"
[registry]
schema = "regstat.region-registry"
schema_version = 1

[[regions]]
key = "Tver"
display_name = "Тверская область"
"#,
    );
    let registry = run_regions(&RegionsArgs {
        regions: Some(path),
    })
    .expect("regions");
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.display_name("Tver"), Some("Тверская область"));
}

#[test]
fn join_reports_both_sides() {
    let dir = temp_dir("join");
    let csv = write(&dir, "table.csv", TABLE);
    let geometry = write(
        &dir,
        "map.geojson",
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"NAME_1":"Karelia"},"geometry":null},
            {"type":"Feature","properties":{"NAME_1":"Tver"},"geometry":null},
            {"type":"Feature","properties":{},"geometry":null}
        ]}"#,
    );
    let args = JoinArgs {
        csv,
        geometry,
        property: "NAME_1".to_string(),
        source: source(&dir, ResolutionArg::AliasTable),
    };
    let result = run_join(&args).expect("join");
    assert_eq!(result.features, 2);
    assert_eq!(result.unnamed_features, 1);
    assert_eq!(result.report.matched, vec!["Karelia"]);
    assert_eq!(result.report.data_without_geometry, vec!["Карелия"]);
    assert_eq!(result.report.geometry_without_data, vec!["Tver"]);
}

#[test]
fn malformed_geometry_is_an_error() {
    let dir = temp_dir("bad_geometry");
    let args = JoinArgs {
        csv: write(&dir, "table.csv", TABLE),
        geometry: write(&dir, "map.geojson", "{\"type\":\"Feature\"}"),
        property: "NAME_1".to_string(),
        source: source(&dir, ResolutionArg::AliasTable),
    };
    let error = run_join(&args).unwrap_err();
    assert!(format!("{error:#}").contains("FeatureCollection"));
}

#[test]
fn json_document_carries_colors_and_names() {
    let dir = temp_dir("json");
    let csv = write(&dir, "table.csv", TABLE);
    let result = run_parse(&parse_args(&dir, csv, ResolutionArg::AliasTable)).expect("parse");
    let value = serde_json::to_value(ParseDocument::new(&result)).expect("json");

    assert_eq!(value["schema"], "congenital-anomalies");
    assert_eq!(value["resolution"], "alias-table");
    assert_eq!(value["bounds"]["min"], 80);
    assert_eq!(value["bounds"]["max"], 120);
    assert_eq!(value["colors"]["Karelia"], "#ff0000");
    assert_eq!(value["colors"]["Карелия"], "#33ff33");
    assert_eq!(value["display_names"]["CityofSt.Petersburg"], "Санкт-Петербург");
    assert_eq!(value["unresolved"][0], "Карелия");
    insta::assert_json_snapshot!(value["regions"]["Karelia"], @r#"
    {
      "name": "Республика Карелия",
      "statistics": {
        "Врожденные аномалии (пороки развития), деформации и хромосомные нарушения": {
          "cases": 120,
          "rate": 45.2
        }
      },
      "total_cases": 120
    }
    "#);
}
