//! Refresh flow through the tracker facade.

mod common;

use common::{category, date, sample_history, temp_store, FailingFetcher, ScriptedFetcher, StaticFetcher};
use sectorcap::{MemoryStore, SectorCapError, SectorTracker, UpsertOutcome};

#[test]
fn refresh_records_fetched_categories_for_the_given_day() {
    let mut tracker = SectorTracker::builder()
        .store(MemoryStore::new())
        .fetcher(StaticFetcher::new(vec![
            category("DeFi", 1000.0, 2.5),
            category("Gaming", 300.0, -4.0),
        ]))
        .build();

    let summary = tracker.refresh(date(2024, 3, 1)).unwrap();

    assert_eq!(summary.date, date(2024, 3, 1));
    assert_eq!(summary.categories, 2);
    assert_eq!(summary.outcome, UpsertOutcome::Inserted { position: 0 });

    let history = tracker.history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].categories[0].sector, "DeFi");
    assert_eq!(history[0].categories[1].market_cap_f64(), Some(300.0));
}

#[test]
fn second_refresh_same_day_replaces_figures() {
    let (store, _tmp) = temp_store();
    let mut tracker = SectorTracker::builder()
        .store(store)
        .fetcher(ScriptedFetcher::new(vec![
            Ok(vec![category("DeFi", 1000.0, 2.5)]),
            Ok(vec![category("DeFi", 1100.0, -1.0)]),
        ]))
        .build();

    tracker.refresh(date(2024, 3, 1)).unwrap();
    let summary = tracker.refresh(date(2024, 3, 1)).unwrap();

    assert_eq!(summary.outcome, UpsertOutcome::Replaced { position: 0 });
    let history = tracker.history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].categories[0].market_cap_f64(), Some(1100.0));
}

#[test]
fn failed_fetch_leaves_history_untouched() {
    let mut tracker = SectorTracker::builder()
        .store(MemoryStore::with_history(sample_history()))
        .fetcher(FailingFetcher(500))
        .build();

    let err = tracker.refresh(date(2024, 3, 1)).unwrap_err();

    assert!(matches!(err, SectorCapError::Status(500)));
    assert_eq!(tracker.history().unwrap(), sample_history());
}

#[test]
fn data_file_option_is_used_by_default_store() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("history.json");
    let mut tracker = SectorTracker::builder()
        .data_file(&path)
        .fetcher(StaticFetcher::new(vec![category("DeFi", 1.0, 0.0)]))
        .build();

    tracker.refresh(date(2024, 3, 1)).unwrap();

    assert!(path.exists());
    assert_eq!(tracker.table().unwrap().len(), 1);
}

#[test]
fn table_and_dashboard_follow_history() {
    let tracker = SectorTracker::builder()
        .store(MemoryStore::with_history(sample_history()))
        .fetcher(FailingFetcher(503))
        .build();

    let table = tracker.table().unwrap();
    let view = tracker.dashboard().unwrap();

    assert_eq!(table.len(), 7);
    assert_eq!(view.table, table);
    assert_eq!(view.sector_snapshot.unwrap().date, date(2024, 2, 1));
}

#[test]
fn empty_store_gives_empty_dashboard() {
    let (store, _tmp) = temp_store();
    let tracker = SectorTracker::builder()
        .store(store)
        .fetcher(FailingFetcher(503))
        .build();

    assert!(tracker.dashboard().unwrap().is_empty());
}
