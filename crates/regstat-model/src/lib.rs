#![deny(unsafe_code)]

pub mod error;
pub mod region;
pub mod schema;
pub mod stat;

pub use error::{ModelError, Result};
pub use region::{DiseaseShare, RegionRecord};
pub use schema::{ColumnSchema, SCHEMA_TAG, SCHEMA_VERSION, SchemaHeader};
pub use stat::{DiseaseStat, Statistics};
