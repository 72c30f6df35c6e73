//! Async wrapper around [`SectorTracker`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every tracker operation on the blocking thread pool via
//! [`tokio::task::spawn_blocking`]. The tracker does blocking HTTP and file
//! IO, which must stay off the async event loop.
//!
//! # Example
//!
//! ```no_run
//! use sectorcap::AsyncSectorTracker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let tracker = AsyncSectorTracker::builder().build();
//!
//!     let summary = tracker.refresh_today().await.unwrap();
//!     let view = tracker.dashboard().await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::charts::DashboardView;
use crate::error::{Result, SectorCapError};
use crate::models::TableRow;
use crate::{config, RefreshSummary, SectorTracker};

// ---------------------------------------------------------------------------
// AsyncSectorTrackerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncSectorTracker`].
pub struct AsyncSectorTrackerBuilder {
    data_file: PathBuf,
    api_url: String,
    timeout: Duration,
}

impl Default for AsyncSectorTrackerBuilder {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(config::DEFAULT_DATA_FILE),
            api_url: config::CATEGORIES_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl AsyncSectorTrackerBuilder {
    /// Set the history file.
    pub fn data_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_file = path.as_ref().to_path_buf();
        self
    }

    /// Set the categories endpoint.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> AsyncSectorTracker {
        let tracker = SectorTracker::builder()
            .data_file(self.data_file)
            .api_url(self.api_url)
            .timeout(self.timeout)
            .build();
        AsyncSectorTracker::new(tracker)
    }
}

// ---------------------------------------------------------------------------
// AsyncSectorTracker
// ---------------------------------------------------------------------------

/// Async wrapper around [`SectorTracker`].
///
/// All operations are dispatched to the blocking thread pool. The tracker
/// sits behind a [`Mutex`], so refreshes issued concurrently from several
/// requests run one after another.
#[derive(Clone)]
pub struct AsyncSectorTracker {
    inner: Arc<Mutex<SectorTracker>>,
}

impl AsyncSectorTracker {
    /// Create a new builder for configuring the async tracker.
    pub fn builder() -> AsyncSectorTrackerBuilder {
        AsyncSectorTrackerBuilder::default()
    }

    /// Wrap an already configured tracker, e.g. one with a custom store.
    pub fn new(tracker: SectorTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Run a sync tracker operation on the blocking thread pool.
    ///
    /// The closure receives a `&mut SectorTracker` and returns a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SectorTracker) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let tracker = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = tracker
                .lock()
                .map_err(|_| SectorCapError::InvalidArgument("Tracker lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| SectorCapError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch and record today's figures.
    pub async fn refresh_today(&self) -> Result<RefreshSummary> {
        self.run(|t| t.refresh_today()).await
    }

    /// The history flattened into table rows.
    pub async fn table(&self) -> Result<Vec<TableRow>> {
        self.run(|t| t.table()).await
    }

    /// Table plus chart views.
    pub async fn dashboard(&self) -> Result<DashboardView> {
        self.run(|t| t.dashboard()).await
    }

    /// Release this handle on the blocking pool.
    ///
    /// The tracker owns a blocking HTTP client, which must not be dropped
    /// on an async worker thread. Call this for the last handle before the
    /// runtime shuts down.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| SectorCapError::InvalidArgument(format!("Task join error: {e}")))
    }
}
