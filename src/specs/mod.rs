// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific extraction rules** for boxer profile pages.
//! It encodes *where the ground truth lives in the HTML* and *how to read it
//! robustly* across the page generations seen in the wild.
//!
//! ## What lives here
//! - **Table location** (`locate`): ordered fallback chains of strategies
//!   (exact id/class → class fragment → structural heuristic), first hit wins.
//! - **Row extraction** (`rows`): header detection, marker/spacer row skipping,
//!   layout-generation detection (Legacy / Ratings / Modern) with probing.
//! - **Profile reading** (`profile`): heading name + label/value attributes.
//! - **Whole-page entry point** (`boxer::parse_doc`): ties the above together
//!   and returns an `Extraction`.
//!
//! ## What does **not** live here
//! - **Fetching and caching**: `core::net` and `store` produce the document text.
//! - **Field semantics** (dates, outcomes, methods, header aliases): `normalize`.
//!   Specs hand it raw cell texts and a column map, nothing more.
//! - **Statistics and export**: `stats`, `csv`, `file`.
//!
//! ## Typical call chain
//! ```text
//! CLI → scrape::collect_boxer → Fetcher::fetch (maybe cached)
//!                             ↘ specs::boxer::parse_doc
//!                                  ├─ locate (profile, then bouts)
//!                                  ├─ profile::extract
//!                                  └─ rows::read_bouts → normalize::Normalizer
//! ```
//!
//! ## Conventions & invariants
//! - Input is always a parsed `scraper::Html`, never raw bytes.
//! - Nothing here fails on a single row or field. Missing sub-elements read as `""`
//!   (strict) or as the whole cell text (lenient); the normalizer decides the rest.
//! - The only hard failures are `EmptyDocument` and `NoTables`.
//! - **No logging spam**: `debug!` when a fallback strategy or layout is chosen,
//!   `trace!` for skipped rows.
//!
//! ## Testing notes
//! - Every spec is tested **offline** against inline HTML fixtures.
//! - Keep selectors resilient to whitespace, attribute order, and harmless markup noise.
pub mod boxer;
pub mod locate;
pub mod profile;
pub mod rows;
