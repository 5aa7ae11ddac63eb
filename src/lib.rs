//! Quorum - Cross-venue prediction market aggregation.
//!
//! This crate ingests binary-outcome market listings from several independent
//! prediction market venues, normalizes them into a common [`domain::Market`]
//! record, and resolves which listings across venues describe the same
//! real-world event.
//!
//! # Architecture
//!
//! The matching core is a pure, deterministic transform with no I/O:
//!
//! - **`matching::sanitize`** - Title normalization used only as a
//!   similarity-comparison key
//! - **`matching::bucket`** - Expiry-proximity bucketing so only markets in
//!   the same event window are compared
//! - **`matching::pairs`** - Cross-venue Jaro-Winkler pair scoring
//! - **`matching::union_find`** - Disjoint-set clustering over retained pairs
//! - **`matching::group`** - Reduction of each cluster into one
//!   [`domain::MatchedGroup`]
//!
//! Ingestion and persistence are collaborators around the core:
//!
//! - [`fetch`] - Per-venue REST fetchers with isolated failures and a
//!   bounded request fan-out, plus the raw-record normalizer
//! - [`store`] - Idempotent upserts of matched groups and raw markets
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Venue enumeration, market and group types
//! - [`error`] - Error types for the crate
//! - [`matching`] - The grouping engine and its `match_markets` entry point
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod matching;
pub mod store;
