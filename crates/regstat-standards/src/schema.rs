use std::path::Path;
use std::sync::OnceLock;

use regstat_model::ColumnSchema;

use crate::embedded::{CONGENITAL_ANOMALIES_V1, EMBEDDED_ORIGIN};
use crate::error::StandardsError;

/// Parses and validates a column schema document.
pub fn parse_column_schema(contents: &str, origin: &Path) -> Result<ColumnSchema, StandardsError> {
    let schema: ColumnSchema = toml::from_str(contents).map_err(|e| StandardsError::Toml {
        path: origin.to_path_buf(),
        source: e,
    })?;
    schema
        .validate()
        .map_err(|e| StandardsError::InvalidSchema {
            path: origin.to_path_buf(),
            source: e,
        })?;
    Ok(schema)
}

pub fn load_column_schema(path: &Path) -> Result<ColumnSchema, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    parse_column_schema(&contents, path)
}

/// Parses the embedded default schema.
pub fn try_default_column_schema() -> Result<ColumnSchema, StandardsError> {
    parse_column_schema(CONGENITAL_ANOMALIES_V1, Path::new(EMBEDDED_ORIGIN))
}

/// The embedded default schema, parsed once per process.
///
/// Returns `None` (after logging) only if the embedded document is invalid.
pub fn default_column_schema() -> Option<&'static ColumnSchema> {
    static SCHEMA: OnceLock<Option<ColumnSchema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| match try_default_column_schema() {
            Ok(schema) => Some(schema),
            Err(error) => {
                tracing::error!(%error, "embedded column schema is invalid");
                None
            }
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_schema_is_valid() {
        let schema = try_default_column_schema().expect("embedded schema");
        assert_eq!(schema.name, "congenital-anomalies");
        assert_eq!(schema.header_rows, 2);
        assert_eq!(schema.region_column, 0);
        assert_eq!(schema.first_disease_column, 2);
        assert_eq!(schema.diseases.len(), 6);
        assert_eq!(
            schema.diseases[0],
            "Врожденные аномалии (пороки развития), деформации и хромосомные нарушения"
        );
        assert_eq!(schema.diseases[5], "Врожденный ихтиоз");
        assert_eq!(schema.expected_width(), 14);
    }

    #[test]
    fn defaults_fill_layout_fields() {
        let doc = r#"
name = "short"
diseases = ["a", "b"]

[schema]
schema = "regstat.column-schema"
schema_version = 1
"#;
        let schema = parse_column_schema(doc, Path::new("short.toml")).expect("parse");
        assert_eq!(schema.header_rows, 2);
        assert_eq!(schema.region_column, 0);
        assert_eq!(schema.first_disease_column, 2);
    }

    #[test]
    fn wrong_tag_is_rejected() {
        let doc = r#"
name = "other"
diseases = ["a"]

[schema]
schema = "something.else"
schema_version = 1
"#;
        let err = parse_column_schema(doc, Path::new("other.toml")).unwrap_err();
        assert!(matches!(err, StandardsError::InvalidSchema { .. }));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = parse_column_schema("name = ", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, StandardsError::Toml { .. }));
    }
}
