//! CLI argument definitions for `regstat`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use regstat_core::{DEFAULT_NAME_PROPERTY, KeyResolution};

#[derive(Parser)]
#[command(
    name = "regstat",
    version,
    about = "Regional medical statistics - parse source tables into choropleth-ready data",
    long_about = "Parse semicolon-delimited regional statistics tables into per-region records.\n\n\
                  Region names are resolved to canonical map keys, case bounds and colors\n\
                  are computed, and the result can be checked against map geometry."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a statistics table and print the per-region result.
    Parse(ParseArgs),

    /// Parse a table and check its region keys against GeoJSON features.
    Join(JoinArgs),

    /// List the known regions with their keys and names.
    Regions(RegionsArgs),

    /// Print the active column schema.
    Schema(SchemaArgs),
}

/// Where reference data comes from and how region labels become keys.
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// Column schema TOML (default: $REGSTAT_SCHEMA, then the built-in schema).
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Region table TOML (default: $REGSTAT_REGIONS, then the built-in table).
    #[arg(long = "regions", value_name = "PATH")]
    pub regions: Option<PathBuf>,

    /// How source region labels are mapped to canonical keys.
    #[arg(long = "resolution", value_enum, default_value = "alias-table")]
    pub resolution: ResolutionArg,
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Semicolon-delimited statistics table.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format for the parsed result.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Parser)]
pub struct JoinArgs {
    /// Semicolon-delimited statistics table.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// GeoJSON FeatureCollection with one feature per region.
    #[arg(long = "geometry", value_name = "GEOJSON")]
    pub geometry: PathBuf,

    /// Feature property holding the region key.
    #[arg(long = "property", default_value = DEFAULT_NAME_PROPERTY)]
    pub property: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser, Default)]
pub struct RegionsArgs {
    /// Region table TOML (default: $REGSTAT_REGIONS, then the built-in table).
    #[arg(long = "regions", value_name = "PATH")]
    pub regions: Option<PathBuf>,
}

#[derive(Parser, Default)]
pub struct SchemaArgs {
    /// Column schema TOML (default: $REGSTAT_SCHEMA, then the built-in schema).
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,
}

/// CLI key resolution choices.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum ResolutionArg {
    /// Exact lookup in the alias table.
    #[default]
    AliasTable,
    /// Any known name of a region.
    Registry,
}

impl From<ResolutionArg> for KeyResolution {
    fn from(value: ResolutionArg) -> Self {
        match value {
            ResolutionArg::AliasTable => KeyResolution::AliasTable,
            ResolutionArg::Registry => KeyResolution::Registry,
        }
    }
}

/// CLI output choices for `parse`.
#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    #[default]
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
