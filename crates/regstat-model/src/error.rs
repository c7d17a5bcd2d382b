use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unexpected schema tag {found:?} (expected {expected:?})")]
    SchemaTag { expected: String, found: String },
    #[error("unsupported schema version {found} (supported: {supported})")]
    SchemaVersion { supported: u32, found: u32 },
    #[error("column schema {0:?} lists no diseases")]
    NoDiseases(String),
    #[error("disease at position {0} has a blank name")]
    BlankDisease(usize),
    #[error("disease {0:?} is listed more than once")]
    DuplicateDisease(String),
    #[error(
        "first disease column {first_disease_column} must come after region column {region_column}"
    )]
    ColumnOverlap {
        region_column: usize,
        first_disease_column: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
