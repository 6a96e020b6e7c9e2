//! Core types for the Linkstash URL shortener.
//!
//! This crate provides the shared types used by the store, analytics,
//! and resolver crates: validated short codes, URL records, click events
//! with their derived metadata, and the clock abstraction.

pub mod click;
pub mod clock;
pub mod error;
pub mod record;
pub mod shortcode;

pub use click::{ClickContext, ClickEvent};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CoreError;
pub use record::UrlRecord;
pub use shortcode::ShortCode;
