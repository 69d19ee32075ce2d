use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// How long a status stays visible before auto-dismissing.
pub const STATUS_TTL: Duration = Duration::from_millis(5000);

/// Severity of a displayed status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

impl StatusLevel {
    /// CSS class suffix used by the page templates.
    pub fn css_class(self) -> &'static str {
        match self {
            StatusLevel::Info => "info",
            StatusLevel::Success => "success",
            StatusLevel::Error => "error",
        }
    }
}

/// A transient status message.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

/// The status display: at most one status at a time, auto-dismissed
/// after [`STATUS_TTL`] unless superseded first.
///
/// Showing a new status cancels the previous dismissal timer, and a
/// timer that already fired checks its generation before clearing, so a
/// stale timer can never dismiss a newer status.
#[derive(Clone, Default)]
pub struct StatusBanner {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    current: Option<Status>,
    generation: u64,
    pending_clear: Option<JoinHandle<()>>,
}

impl StatusBanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a status, superseding any currently displayed one.
    pub async fn show(&self, level: StatusLevel, text: impl Into<String>) {
        let mut inner = self.inner.lock().await;

        if let Some(handle) = inner.pending_clear.take() {
            handle.abort();
        }

        inner.generation += 1;
        let generation = inner.generation;
        inner.current = Some(Status {
            level,
            text: text.into(),
        });

        let banner = self.clone();
        inner.pending_clear = Some(tokio::spawn(async move {
            tokio::time::sleep(STATUS_TTL).await;
            banner.dismiss_if_current(generation).await;
        }));
    }

    /// Clears the banner immediately, e.g. when navigating away.
    pub async fn dismiss(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(handle) = inner.pending_clear.take() {
            handle.abort();
        }
        inner.current = None;
    }

    /// The currently displayed status, if any.
    pub async fn current(&self) -> Option<Status> {
        self.inner.lock().await.current.clone()
    }

    async fn dismiss_if_current(&self, generation: u64) {
        let mut inner = self.inner.lock().await;
        if inner.generation == generation {
            inner.current = None;
            inner.pending_clear = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn advance(duration: Duration) {
        // Let any freshly-spawned dismissal task be polled so it registers
        // its sleep timer at the current paused instant before we advance.
        tokio::task::yield_now().await;
        tokio::time::advance(duration).await;
        // Let a fired dismissal task run.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn status_auto_clears_after_ttl() {
        let banner = StatusBanner::new();
        banner.show(StatusLevel::Info, "Logging in...").await;
        assert!(banner.current().await.is_some());

        advance(STATUS_TTL - Duration::from_millis(1)).await;
        assert!(banner.current().await.is_some(), "not yet expired");

        advance(Duration::from_millis(2)).await;
        assert_eq!(banner.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_status_supersedes_pending_dismissal() {
        let banner = StatusBanner::new();
        banner.show(StatusLevel::Info, "Logging in...").await;

        advance(Duration::from_millis(4000)).await;
        banner
            .show(StatusLevel::Error, "Invalid username or password. Please try again.")
            .await;

        // The first status's timer would have fired here; the second
        // status must survive it.
        advance(Duration::from_millis(2000)).await;
        let current = banner.current().await.expect("second status still visible");
        assert_eq!(current.level, StatusLevel::Error);

        // And the second status still dismisses on its own schedule.
        advance(STATUS_TTL).await;
        assert_eq!(banner.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_clears_immediately() {
        let banner = StatusBanner::new();
        banner.show(StatusLevel::Success, "Login successful!").await;
        banner.dismiss().await;
        assert_eq!(banner.current().await, None);
    }
}
