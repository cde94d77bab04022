//! "Recently copied" flags keyed by copy key, each cleared by its own timer.

use std::{collections::HashMap, sync::{Arc, Weak}, time::Duration};

use parking_lot::Mutex;
use tokio::{task::JoinHandle, time::Instant};

/// How long a copy control shows its confirmation.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

type Flags = Arc<Mutex<HashMap<String, bool>>>;

/// Entries are never removed; the map only grows while the results screen lives.
///
/// Marking a key replaces (aborts) that key's pending reset, so the latest copy always
/// decides when the flag goes back to false. Dropping the state aborts every timer, and a
/// timer that still gets to run after the drop finds nothing to write to.
pub struct CopyState {
    flags: Flags,
    timers: HashMap<String, JoinHandle<()>>,
    delay: Duration,
}

impl Default for CopyState {
    fn default() -> Self { Self::new() }
}

impl CopyState {
    pub fn new() -> Self {
        Self { flags: Arc::default(), timers: HashMap::new(), delay: COPY_FEEDBACK }
    }

    /// Sets `key` to copied and schedules the reset. Must run inside a Tokio runtime.
    pub fn mark(&mut self, key: &str) {
        self.flags.lock().insert(key.to_owned(), true);

        let deadline = Instant::now() + self.delay;
        let flags: Weak<Mutex<HashMap<String, bool>>> = Arc::downgrade(&self.flags);
        let owned_key = key.to_owned();
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(flags) = flags.upgrade() {
                flags.lock().insert(owned_key.clone(), false);
                tracing::debug!(key = %owned_key, "copy flag cleared");
            }
        });

        if let Some(previous) = self.timers.insert(key.to_owned(), handle) {
            previous.abort();
        }
    }

    pub fn is_copied(&self, key: &str) -> bool {
        self.flags.lock().get(key).copied().unwrap_or(false)
    }

    /// Number of keys ever copied in this session.
    pub fn len(&self) -> usize { self.flags.lock().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Drop for CopyState {
    fn drop(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn flag_is_set_immediately_and_cleared_after_delay() {
        let mut state = CopyState::new();
        assert!(!state.is_copied("fb-0"));

        state.mark("fb-0");
        assert!(state.is_copied("fb-0"));

        sleep(Duration::from_millis(1999)).await;
        assert!(state.is_copied("fb-0"));

        sleep(Duration::from_millis(2)).await;
        assert!(!state.is_copied("fb-0"));
        assert_eq!(state.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn latest_copy_governs_the_reset() {
        let mut state = CopyState::new();
        state.mark("fb-all");
        sleep(Duration::from_millis(1500)).await;
        state.mark("fb-all");

        // The first copy's deadline passes, but its timer was replaced.
        sleep(Duration::from_millis(600)).await;
        assert!(state.is_copied("fb-all"));

        sleep(Duration::from_millis(1401)).await;
        assert!(!state.is_copied("fb-all"));
    }

    #[tokio::test(start_paused = true)]
    async fn keys_expire_independently() {
        let mut state = CopyState::new();
        state.mark("hash-0");
        sleep(Duration::from_millis(1000)).await;
        state.mark("hash-1");

        sleep(Duration::from_millis(1001)).await;
        assert!(!state.is_copied("hash-0"));
        assert!(state.is_copied("hash-1"));

        sleep(Duration::from_millis(1000)).await;
        assert!(!state.is_copied("hash-1"));
        assert_eq!(state.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_state_invalidates_pending_timers() {
        let mut state = CopyState::new();
        state.mark("tone");
        let flags = Arc::downgrade(&state.flags);
        drop(state);

        sleep(Duration::from_millis(2500)).await;
        assert!(flags.upgrade().is_none());
    }
}
