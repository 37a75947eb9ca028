//! Wireloft Core Library
//!
//! This crate discovers every episode published under a DailyWire show by
//! crawling the Middleware API, whose responses have no stable schema.
//!
//! # Features
//! - Schema-tolerant episode slug extraction from arbitrary JSON
//! - Show and season mapping over inconsistent field names
//! - Heuristic next-page detection (cursor or page-number style)
//! - Bounded crawl per season with cycle detection
//! - Rate-limited HTTP client with retries for transient errors

pub mod catalog;
pub mod client;
pub mod crawler;
pub mod error;
pub mod parser;
pub mod types;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use client::{ClientConfig, RateLimiter, Transport, TransportResult, WireClient};
pub use crawler::{Crawler, MAX_CURSOR_ITERATIONS, MAX_PAGE_NUMBER};
pub use error::{Result, TransportError, TransportErrorKind, WireError};
pub use types::{EpisodeInfo, EpisodeRef, EpisodeSlug, PageParams, ParamValue, SeasonInfo, ShowInfo, Thumbnail};
