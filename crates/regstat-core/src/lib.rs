//! Per-parse dataset snapshots for the map layer.
//!
//! A [`DatasetSnapshot`] is built once per parsed table and never mutated:
//! re-reading a table produces a new snapshot that replaces the old one.

#![deny(unsafe_code)]

pub mod geometry;
pub mod scale;
pub mod snapshot;

pub use geometry::{DEFAULT_NAME_PROPERTY, GeometryError, GeometryIndex, JoinReport};
pub use scale::{Rgb, color_for, normalize};
pub use snapshot::{CaseBounds, DatasetSnapshot, KeyResolution, display_label};
