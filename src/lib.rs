//! Daily sector market-cap tracker.
//!
//! Pulls per-category market figures from the CoinGecko API, keeps one
//! snapshot per calendar day in a local JSON file, and derives the table
//! and chart views the dashboard shows.
//!
//! # Quick start
//!
//! ```no_run
//! use sectorcap::SectorTracker;
//!
//! let mut tracker = SectorTracker::builder().build();
//!
//! // Fetch today's figures and record them
//! let summary = tracker.refresh_today().unwrap();
//! println!("{} categories stored for {}", summary.categories, summary.date);
//!
//! // Everything recorded so far, flattened
//! let rows = tracker.table().unwrap();
//! ```
//!
//! The history file is owned by a single process. Running two trackers
//! against the same file can lose updates.

#[cfg(feature = "async")]
pub mod async_client;
pub mod charts;
pub mod config;
#[cfg(feature = "dashboard")]
pub mod dashboard;
pub mod error;
pub mod fetch;
#[cfg(feature = "dashboard")]
pub mod logging;
pub mod models;
pub mod store;
pub mod transform;

#[cfg(feature = "async")]
pub use async_client::AsyncSectorTracker;
pub use charts::DashboardView;
pub use error::{Result, SectorCapError};
pub use fetch::{CoinGeckoFetcher, Fetcher};
pub use models::{Category, CategoryPoint, Snapshot, TableRow};
pub use store::{JsonFileStore, MemoryStore, Store, UpsertOutcome};

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// SectorTrackerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SectorTracker`].
///
/// Use [`SectorTracker::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SectorTrackerBuilder::build).
pub struct SectorTrackerBuilder {
    data_file: PathBuf,
    api_url: String,
    timeout: Duration,
    store: Option<Box<dyn Store + Send>>,
    fetcher: Option<Box<dyn Fetcher + Send>>,
}

impl Default for SectorTrackerBuilder {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(config::DEFAULT_DATA_FILE),
            api_url: config::CATEGORIES_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            store: None,
            fetcher: None,
        }
    }
}

impl SectorTrackerBuilder {
    /// Set the history file.
    ///
    /// Defaults to `marketcap_data.json` in the working directory. Ignored
    /// when a custom [`store`](Self::store) is supplied.
    pub fn data_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_file = path.as_ref().to_path_buf();
        self
    }

    /// Set the categories endpoint. Ignored when a custom
    /// [`fetcher`](Self::fetcher) is supplied.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom store instead of the JSON file.
    pub fn store<S: Store + Send + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Use a custom fetcher instead of the CoinGecko client.
    pub fn fetcher<F: Fetcher + Send + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Build the tracker. No network or file access happens until the
    /// first call that needs it.
    pub fn build(self) -> SectorTracker {
        let store: Box<dyn Store + Send> = match self.store {
            Some(store) => store,
            None => Box::new(JsonFileStore::new(&self.data_file)),
        };
        let fetcher: Box<dyn Fetcher + Send> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(CoinGeckoFetcher::new(self.api_url, self.timeout)),
        };
        SectorTracker { store, fetcher }
    }
}

// ---------------------------------------------------------------------------
// RefreshSummary
// ---------------------------------------------------------------------------

/// Result of a successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshSummary {
    #[serde(with = "models::snapshot::date_key")]
    pub date: NaiveDate,
    /// Number of categories stored for `date`.
    pub categories: usize,
    pub outcome: UpsertOutcome,
}

// ---------------------------------------------------------------------------
// SectorTracker
// ---------------------------------------------------------------------------

/// Fetches sector data, records it by day, and serves the derived views.
///
/// Created via [`SectorTracker::builder()`].
pub struct SectorTracker {
    store: Box<dyn Store + Send>,
    fetcher: Box<dyn Fetcher + Send>,
}

impl SectorTracker {
    /// Create a new builder for configuring the tracker.
    pub fn builder() -> SectorTrackerBuilder {
        SectorTrackerBuilder::default()
    }

    /// Fetch the current figures and record them as the snapshot for `today`.
    ///
    /// An existing snapshot for `today` has its categories replaced; the
    /// history is left untouched when the fetch fails.
    pub fn refresh(&mut self, today: NaiveDate) -> Result<RefreshSummary> {
        let categories = match self.fetcher.fetch() {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, "Failed to fetch market data");
                return Err(e);
            }
        };

        let points: Vec<CategoryPoint> =
            categories.into_iter().map(CategoryPoint::from).collect();
        let count = points.len();
        let outcome = self.store.upsert(today, points)?;

        info!(
            date = %today.format(config::DATE_FORMAT),
            categories = count,
            "Data updated"
        );
        Ok(RefreshSummary {
            date: today,
            categories: count,
            outcome,
        })
    }

    /// [`refresh`](Self::refresh) using the local calendar date.
    pub fn refresh_today(&mut self) -> Result<RefreshSummary> {
        self.refresh(config::today())
    }

    /// The full recorded history.
    pub fn history(&self) -> Result<Vec<Snapshot>> {
        self.store.load()
    }

    /// The history flattened into table rows.
    pub fn table(&self) -> Result<Vec<TableRow>> {
        Ok(transform::flatten(&self.history()?))
    }

    /// Table plus chart views, derived from the current history.
    pub fn dashboard(&self) -> Result<DashboardView> {
        Ok(DashboardView::from_history(&self.history()?))
    }
}
