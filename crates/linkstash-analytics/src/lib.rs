//! Click statistics for the Linkstash URL shortener.
//!
//! Aggregation is a pure function of store state: the grouping helpers
//! fold a click log into per-source and per-date counts, and
//! [`StatsService`] combines them with the record snapshot. Nothing in
//! this crate mutates the store.

pub mod aggregate;
pub mod service;

pub use aggregate::{clicks_by_date, clicks_by_source};
pub use service::{StatsService, UrlStats};
