use crate::entry::LogEntry;
use crate::error::SinkError;
use async_trait::async_trait;

/// Delivery mechanism for log entries.
#[async_trait]
pub trait LogTransport: Send + Sync + 'static {
    /// Attempts to deliver one entry.
    async fn send(&self, entry: &LogEntry) -> Result<(), SinkError>;
}

/// HTTP implementation of [`LogTransport`]: POSTs each entry as JSON to
/// the collector endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport posting to the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl LogTransport for HttpTransport {
    async fn send(&self, entry: &LogEntry) -> Result<(), SinkError> {
        self.client
            .post(&self.endpoint)
            .json(entry)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| SinkError::Transport(e.to_string()))?;
        Ok(())
    }
}
