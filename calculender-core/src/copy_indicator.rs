//! Transient "link copied" flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

/// How long the flag stays up after a copy.
pub const COPY_INDICATOR_DURATION: Duration = Duration::from_millis(3000);

/// Raised by [`CopyIndicator::mark_copied`], lowered automatically after
/// [`COPY_INDICATOR_DURATION`]. Each mark restarts the countdown.
///
/// Must be marked from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct CopyIndicator {
    state: Arc<watch::Sender<bool>>,
    generation: Arc<AtomicU64>,
    duration: Duration,
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::with_duration(COPY_INDICATOR_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        let (state, _) = watch::channel(false);
        CopyIndicator {
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            duration,
        }
    }

    pub fn mark_copied(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(true);

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            // A newer mark owns the flag now.
            if current.load(Ordering::SeqCst) == generation {
                state.send_replace(false);
            }
        });
    }

    pub fn is_active(&self) -> bool {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    /// Resolves once the flag is down. Returns at once if it already is.
    pub async fn cleared(&self) {
        let mut state = self.state.subscribe();
        // `self` holds the sender, so the channel cannot close while we wait.
        state.wait_for(|active| !*active).await.ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn clears_after_three_seconds() {
        let indicator = CopyIndicator::new();
        assert!(!indicator.is_active());

        indicator.mark_copied();
        assert!(indicator.is_active());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(indicator.is_active());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!indicator.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn second_copy_restarts_the_countdown() {
        let indicator = CopyIndicator::new();
        indicator.mark_copied();

        tokio::time::sleep(Duration::from_millis(2000)).await;
        indicator.mark_copied();

        // The first countdown has expired by now but must not clear the flag.
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(indicator.is_active());

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(!indicator.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_both_transitions() {
        let indicator = CopyIndicator::new();
        let mut rx = indicator.subscribe();

        indicator.mark_copied();
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());

        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());
    }

    #[tokio::test(start_paused = true)]
    async fn cleared_waits_for_the_countdown() {
        let indicator = CopyIndicator::new();
        indicator.cleared().await;

        indicator.mark_copied();
        let start = tokio::time::Instant::now();
        indicator.cleared().await;

        assert!(!indicator.is_active());
        assert!(start.elapsed() >= COPY_INDICATOR_DURATION);
    }
}
