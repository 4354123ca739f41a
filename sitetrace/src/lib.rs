//! # Sitetrace
//!
//! Resolves a company's canonical website from third-party directory listings.
//!
//! For each input record, sitetrace searches for the company on one directory
//! (professional network, review site, investment database, or an app store),
//! fetches each result page, and extracts:
//!
//! - **A stable identifier** parsed from the result URL
//! - **Candidate websites** claimed on the page
//! - **A domain match** between each candidate and the known domain
//!
//! Failures are contained per result and per record and reported to an error
//! stream; they never stop the rest of the batch.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sitetrace::prelude::*;
//! use std::sync::Arc;
//!
//! let config = ResolverConfig::default();
//! let fetcher = Arc::new(HttpFetcher::new(config.fetch.clone(), &config.proxies)?);
//! let sink = Arc::new(FileOutputSink::create(".", "1")?);
//!
//! let resolver = Resolver::new(config, fetcher, sink)?;
//! let summary = resolver.run_batch(read_input_csv("input/input_1.csv".as_ref())?).await;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod extractors;
pub mod input;
pub mod pipeline;
pub mod search;
pub mod sinks;
pub mod testing;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{FetchConfig, ProxyConfig, ResolverConfig, SearchConfig};
    pub use crate::core::{
        ErrorEntry, InputRecord, OutputRow, RawInputRecord, SearchResult, SourceType,
    };
    pub use crate::domain::DomainNormalizer;
    pub use crate::errors::{ExtractionError, ResolveError, TransportError};
    pub use crate::extractors::{strategy_for, ContentExtractor, IdentifierExtractor, SourceStrategy};
    pub use crate::input::read_input_csv;
    pub use crate::pipeline::{BatchSummary, RecordOutcome, RecordStatus, Resolver};
    pub use crate::sinks::{CollectingOutputSink, FileOutputSink, OutputSink};
    #[cfg(feature = "http")]
    pub use crate::transport::HttpFetcher;
    pub use crate::transport::{FetchResult, Fetcher, ProxyProfile};
}
