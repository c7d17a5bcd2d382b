//! Reference data for regional statistics.
//!
//! - [`registry`]: one identity per federal subject with all of its names
//! - [`resolve`]: source label → canonical key, with identity fallback
//! - [`schema`]: versioned column schemas for source tables
//!
//! Reference documents are embedded at compile time (see [`embedded`]) and
//! can be replaced at runtime through the paths in [`paths`].

#![deny(unsafe_code)]

pub mod embedded;
pub mod error;
pub mod paths;
pub mod registry;
pub mod resolve;
pub mod schema;

pub use crate::error::{StandardsError, UnresolvedRegion};
pub use crate::registry::{
    RegionIdentity, RegionRegistry, default_registry, display_name,
};
pub use crate::resolve::{RegionKeyMap, resolve};
pub use crate::schema::{
    default_column_schema, load_column_schema, parse_column_schema, try_default_column_schema,
};
