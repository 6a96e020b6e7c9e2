use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::trace;

/// Default redirect delay, in seconds.
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 5;

/// A cancellable redirect countdown.
///
/// Starting a countdown spawns a task that decrements the remaining
/// seconds once per second, observable through a watch channel. The
/// countdown finishing (reaching zero, or being skipped) is the
/// "navigate now" signal. Dropping or cancelling the countdown aborts
/// the task, so no tick or navigation signal fires after teardown.
#[derive(Debug)]
pub struct Countdown {
    remaining: watch::Receiver<u32>,
    skip: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Starts a countdown from the given number of seconds.
    pub fn start(seconds: u32) -> Self {
        let (tx, rx) = watch::channel(seconds);
        let skip = Arc::new(Notify::new());
        let skip_signal = Arc::clone(&skip);

        let handle = tokio::spawn(async move {
            let mut remaining = seconds;
            while remaining > 0 {
                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_secs(1)) => {
                        remaining -= 1;
                    }
                    _ = skip_signal.notified() => {
                        trace!("countdown skipped");
                        remaining = 0;
                    }
                }
                if tx.send(remaining).is_err() {
                    // Receiver gone; nobody is left to navigate.
                    return;
                }
            }
        });

        Self {
            remaining: rx,
            skip,
            handle,
        }
    }

    /// The seconds left on the countdown.
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    /// A receiver observing every remaining-seconds update.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    /// Manual override: collapses the countdown to zero immediately.
    pub fn skip(&self) {
        self.skip.notify_one();
    }

    /// Waits for the countdown to reach zero.
    ///
    /// Returns `true` when the countdown finished (navigate now) and
    /// `false` if it was torn down before reaching zero.
    pub async fn finished(&mut self) -> bool {
        self.remaining.wait_for(|remaining| *remaining == 0).await.is_ok()
    }

    /// Stops the countdown; the ticking task is aborted immediately.
    pub fn cancel(self) {}
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn counts_down_one_tick_per_second() {
        let started = Instant::now();
        let mut countdown = Countdown::start(5);
        assert_eq!(countdown.remaining(), 5);

        assert!(countdown.finished().await);
        assert_eq!(countdown.remaining(), 0);
        // Five one-second ticks of virtual time elapsed.
        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn skip_collapses_the_countdown() {
        let started = Instant::now();
        let mut countdown = Countdown::start(500);

        countdown.skip();
        assert!(countdown.finished().await);
        // The manual override fired without waiting out the ticks.
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_emits_no_navigation_signal() {
        let countdown = Countdown::start(5);
        let mut observer = countdown.subscribe();

        countdown.cancel();

        // The channel closes without ever reaching zero.
        let result = observer.wait_for(|remaining| *remaining == 0).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_the_ticking_task() {
        let countdown = Countdown::start(5);
        let mut observer = countdown.subscribe();

        drop(countdown);

        let result = observer.wait_for(|remaining| *remaining == 0).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn observer_sees_every_tick() {
        let countdown = Countdown::start(3);
        let mut observer = countdown.subscribe();

        let mut seen = Vec::new();
        while observer.changed().await.is_ok() {
            seen.push(*observer.borrow());
            if *observer.borrow() == 0 {
                break;
            }
        }
        assert_eq!(seen, vec![2, 1, 0]);
    }
}
