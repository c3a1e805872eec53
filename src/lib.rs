//! # sitegrab
//!
//! Retrieve the raw markup of an arbitrary web page through public relay
//! endpoints and rewrite it so relative references still resolve against
//! the original site.
//!
//! ## Architecture
//!
//! ```text
//! URL → RetrievalEngine (relay A → B → C) → DocumentNormalizer → page
//! ```
//!
//! - [`engine`]: ordered relay chain with per-attempt failure isolation
//! - [`normalizer`]: `<base href>` injection
//! - [`fetcher`]: HTTP transport behind a trait
//!
//! ## Quick Start
//!
//! ```bash
//! # Print a page with its base reference injected
//! sitegrab scan example.com
//!
//! # Save several pages into a directory
//! sitegrab scan example.com rust-lang.org -o pages/
//!
//! # Show the relay chain
//! sitegrab relays
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config,
/// fetcher, engine and normalizer.
pub mod app;

/// Command-line interface using clap.
///
/// - `scan <url>...` - Retrieve pages
/// - `normalize <file> --source <url>` - Fix up hand-saved markup
/// - `relays` - List the relay chain
/// - `config-path` - Show the config file location
pub mod cli;

/// Configuration loaded from `~/.config/sitegrab/config.toml`.
pub mod config;

/// Core data types.
///
/// - [`RetrievalRequest`](domain::RetrievalRequest): validated scan target
/// - [`RetrievalOutcome`](domain::RetrievalOutcome): success or exhaustion
/// - [`ProgressEvent`](domain::ProgressEvent) and [`ProgressSink`](domain::ProgressSink)
pub mod domain;

/// Relay strategies and the retrieval chain.
///
/// - [`RetrievalEngine`](engine::RetrievalEngine): sequential first-success chain
/// - [`RelayStrategy`](engine::RelayStrategy): URL template plus decoding rule
/// - [`ParallelRetriever`](engine::ParallelRetriever): concurrent independent scans
pub mod engine;

/// HTTP transport.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait, one GET per call
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Base-reference injection for retrieved markup.
pub mod normalizer;

pub use app::{AppContext, Result, SitegrabError};
pub use domain::{ProgressEvent, ProgressSink, RetrievalOutcome};
pub use engine::RetrievalEngine;
pub use normalizer::DocumentNormalizer;
