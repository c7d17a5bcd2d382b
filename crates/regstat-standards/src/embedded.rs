//! Reference data embedded at compile time using `include_str!()`.

/// Pseudo-path used in error messages for embedded documents.
pub const EMBEDDED_ORIGIN: &str = "<embedded>";

/// Region registry: canonical keys, display names and source labels.
pub const REGIONS: &str = include_str!("../data/regions.toml");

/// Default column schema (congenital anomalies table, version 1).
pub const CONGENITAL_ANOMALIES_V1: &str = include_str!("../data/schema/congenital-anomalies-v1.toml");
