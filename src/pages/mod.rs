//! Page controllers
//!
//! Each page owns its listing, its draft and a submission controller. Two
//! flows run per page: the listing fetch, which fails soft (errors are logged
//! and the previous listing stays), and the submission pipeline, which fails
//! loud. A successful write schedules one re-fetch
//! [`ChainConfig::refresh_delay`](crate::config::ChainConfig) later; the
//! caller drives it with `run_pending_refresh`, and it is dropped if the page
//! closes first.

pub mod event;
pub mod group;

pub use event::EventPage;
pub use group::GroupPage;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Mounted/unmounted flag shared between a page and whoever closes it
#[derive(Clone)]
pub struct PageLifetime {
    alive: Arc<watch::Sender<bool>>,
}

impl Default for PageLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLifetime {
    pub fn new() -> Self {
        let (alive, _) = watch::channel(true);
        Self {
            alive: Arc::new(alive),
        }
    }

    pub fn is_alive(&self) -> bool {
        *self.alive.borrow()
    }

    /// Mark the page as gone; pending delayed work is abandoned
    pub fn close(&self) {
        self.alive.send_replace(false);
    }

    /// Sleep for `delay`, returning early with `false` if the page closes
    pub async fn sleep_while_alive(&self, delay: Duration) -> bool {
        if !self.is_alive() {
            return false;
        }
        let mut watcher = self.alive.subscribe();

        tokio::select! {
            _ = tokio::time::sleep(delay) => self.is_alive(),
            _ = watcher.wait_for(|alive| !*alive) => false,
        }
    }
}

/// At most one scheduled listing re-fetch
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PendingRefresh {
    due: Option<Instant>,
}

impl PendingRefresh {
    /// Schedule (or push back) the re-fetch to `delay` from now
    pub(crate) fn schedule(&mut self, delay: Duration) {
        log::debug!("   ⏱️  Refresh scheduled in {:?}", delay);
        self.due = Some(Instant::now() + delay);
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Wait for the deadline; `true` means the re-fetch should run now
    ///
    /// The schedule is only consumed once the wait settles, so a dropped
    /// wait leaves it in place.
    pub(crate) async fn wait(&mut self, lifetime: &PageLifetime) -> bool {
        let Some(due) = self.due else {
            return false;
        };
        let proceed = lifetime
            .sleep_while_alive(due.saturating_duration_since(Instant::now()))
            .await;
        self.due = None;
        if !proceed {
            log::debug!("   Page closed, skipping refresh");
        }
        proceed
    }
}
