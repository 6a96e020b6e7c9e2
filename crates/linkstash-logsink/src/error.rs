use thiserror::Error;

/// Failures internal to the diagnostic channel.
///
/// These never cross the crate boundary through [`LogSink`]; they only
/// flow between the sink and its transport.
///
/// [`LogSink`]: crate::sink::LogSink
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    #[error("invalid log entry: {0}")]
    InvalidEntry(String),
    #[error("log transport failed: {0}")]
    Transport(String),
}
