//! CLI library components for the `regstat` binary.

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
