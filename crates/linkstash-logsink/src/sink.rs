use crate::entry::{LogEntry, LogLevel, LogStack};
use crate::error::SinkError;
use crate::transport::LogTransport;
use jiff::Timestamp;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

const DEFAULT_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Fire-and-forget sink in front of a [`LogTransport`].
///
/// Delivery is attempted a few times with a linearly growing delay;
/// entries that still cannot be delivered are parked in an offline
/// queue until the next [`flush`](LogSink::flush). No method here
/// returns an error: the diagnostic channel must never affect the
/// caller.
#[derive(Debug)]
pub struct LogSink<T> {
    transport: T,
    attempts: u32,
    retry_delay: Duration,
    queue: Mutex<VecDeque<LogEntry>>,
}

impl<T: LogTransport> LogSink<T> {
    /// Creates a sink with the default retry policy.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            attempts: DEFAULT_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Builds and ships an entry stamped with the current time.
    ///
    /// An entry that fails validation is dropped.
    pub async fn emit(
        &self,
        stack: LogStack,
        level: LogLevel,
        package: &str,
        message: impl Into<String>,
    ) {
        match LogEntry::new(stack, level, package, message, Timestamp::now()) {
            Ok(entry) => self.log(entry).await,
            Err(e) => debug!(error = %e, "dropped invalid log entry"),
        }
    }

    /// Ships one entry, queueing it if delivery keeps failing.
    pub async fn log(&self, entry: LogEntry) {
        if let Err(e) = self.send_with_retry(&entry).await {
            debug!(error = %e, "queued undeliverable log entry");
            self.queue.lock().await.push_back(entry);
        }
    }

    /// Retries everything in the offline queue once, re-queueing what
    /// still fails. Returns the number of entries delivered.
    pub async fn flush(&self) -> usize {
        let mut queue = self.queue.lock().await;
        let pending: Vec<LogEntry> = queue.drain(..).collect();
        drop(queue);

        let mut delivered = 0;
        for entry in pending {
            match self.transport.send(&entry).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    debug!(error = %e, "log entry still undeliverable");
                    self.queue.lock().await.push_back(entry);
                }
            }
        }
        delivered
    }

    /// Number of entries waiting in the offline queue.
    pub async fn queued(&self) -> usize {
        self.queue.lock().await.len()
    }

    async fn send_with_retry(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let mut last = SinkError::Transport("no delivery attempted".to_string());
        for attempt in 1..=self.attempts {
            match self.transport.send(entry).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    last = e;
                    if attempt < self.attempts {
                        tokio::time::sleep(self.retry_delay * attempt).await;
                    }
                }
            }
        }
        Err(last)
    }
}
