// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod normalize;
pub mod progress;
pub mod scrape;
pub mod stats;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::{BoutRecord, Extraction, Outcome, ProfileSummary};
pub use specs::boxer::{parse_doc, parse_str};
