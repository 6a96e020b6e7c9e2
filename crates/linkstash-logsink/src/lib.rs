//! Best-effort diagnostic log side channel.
//!
//! Structured log entries are shipped to an external HTTP collector.
//! The channel is strictly fire-and-forget: delivery is retried a few
//! times, undeliverable entries land in an offline queue for a later
//! [`flush`](sink::LogSink::flush), and no failure anywhere in this
//! crate ever propagates to the caller.

pub mod entry;
pub mod error;
pub mod sink;
pub mod transport;

pub use entry::{LogEntry, LogLevel, LogStack};
pub use error::SinkError;
pub use sink::LogSink;
pub use transport::{HttpTransport, LogTransport};
