//! Shared fixtures for the sectorcap integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::Number;
use sectorcap::{Category, CategoryPoint, Fetcher, JsonFileStore, Result, SectorCapError, Snapshot};

/// Shorthand for a calendar date.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn category(name: &str, market_cap: f64, change: f64) -> Category {
    Category {
        name: name.to_string(),
        market_cap: Number::from_f64(market_cap),
        market_cap_change_24h: Number::from_f64(change),
    }
}

/// Three days of history with two or three sectors each.
pub fn sample_history() -> Vec<Snapshot> {
    vec![
        Snapshot::new(
            date(2024, 1, 1),
            vec![
                CategoryPoint::new("DeFi", 1000.0, 2.5),
                CategoryPoint::new("Gaming", 500.0, -1.5),
            ],
        ),
        Snapshot::new(
            date(2024, 1, 15),
            vec![
                CategoryPoint::new("DeFi", 1100.0, 10.0),
                CategoryPoint::new("Gaming", 450.0, -10.0),
                CategoryPoint::new("Meme", 90.0, 30.0),
            ],
        ),
        Snapshot::new(
            date(2024, 2, 1),
            vec![
                CategoryPoint::new("Meme", 120.0, 33.3),
                CategoryPoint::new("DeFi", 1200.0, 9.1),
            ],
        ),
    ]
}

/// A `JsonFileStore` inside a fresh temp directory.
///
/// Returns `(JsonFileStore, tempfile::TempDir)`. Keep the `TempDir` alive for
/// the duration of the test.
pub fn temp_store() -> (JsonFileStore, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(tmp_dir.path().join("marketcap_data.json"));
    (store, tmp_dir)
}

// ---------------------------------------------------------------------------
// Canned fetchers
// ---------------------------------------------------------------------------

/// Returns the same categories on every call and counts the calls.
pub struct StaticFetcher {
    pub categories: Vec<Category>,
    pub calls: usize,
}

impl StaticFetcher {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            calls: 0,
        }
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&mut self) -> Result<Vec<Category>> {
        self.calls += 1;
        Ok(self.categories.clone())
    }
}

/// Returns a queued response per call, failing once the queue is empty.
pub struct ScriptedFetcher {
    responses: Vec<Result<Vec<Category>>>,
}

impl ScriptedFetcher {
    pub fn new(mut responses: Vec<Result<Vec<Category>>>) -> Self {
        responses.reverse();
        Self { responses }
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch(&mut self) -> Result<Vec<Category>> {
        self.responses
            .pop()
            .unwrap_or(Err(SectorCapError::Status(503)))
    }
}

/// Always fails with the given HTTP status.
pub struct FailingFetcher(pub u16);

impl Fetcher for FailingFetcher {
    fn fetch(&mut self) -> Result<Vec<Category>> {
        Err(SectorCapError::Status(self.0))
    }
}

/// Answers 200 with a body that is not a categories array.
pub struct GarbledFetcher;

impl Fetcher for GarbledFetcher {
    fn fetch(&mut self) -> Result<Vec<Category>> {
        serde_json::from_str::<Vec<Category>>("<html>rate limited</html>")
            .map_err(SectorCapError::Decode)
    }
}
