//! Flat table derivation and latest-date selection.

mod common;

use common::{date, sample_history};
use sectorcap::transform::{flatten, latest_date, rows_on};
use sectorcap::{CategoryPoint, Snapshot};

#[test]
fn flatten_yields_one_row_per_category() {
    let history = sample_history();
    let expected: usize = history.iter().map(|s| s.categories.len()).sum();

    let rows = flatten(&history);

    assert_eq!(rows.len(), expected);
    let mut i = 0;
    for snapshot in &history {
        for point in &snapshot.categories {
            assert_eq!(rows[i].date, snapshot.date);
            assert_eq!(rows[i].sector, point.sector);
            assert_eq!(rows[i].market_cap, point.market_cap_f64());
            assert_eq!(rows[i].change_24h, point.change_24h_f64());
            i += 1;
        }
    }
}

#[test]
fn flatten_empty_history() {
    assert!(flatten(&[]).is_empty());
}

#[test]
fn flatten_skips_days_without_categories() {
    let history = vec![
        Snapshot::new(date(2024, 1, 1), Vec::new()),
        Snapshot::new(date(2024, 1, 2), vec![CategoryPoint::new("DeFi", 1.0, 0.0)]),
    ];
    let rows = flatten(&history);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, date(2024, 1, 2));
}

#[test]
fn latest_date_picks_maximum() {
    let rows = flatten(&sample_history());
    assert_eq!(latest_date(&rows), Some(date(2024, 2, 1)));
}

#[test]
fn latest_date_ignores_insertion_order() {
    let mut history = sample_history();
    history.swap(0, 2);
    let rows = flatten(&history);
    assert_eq!(latest_date(&rows), Some(date(2024, 2, 1)));
}

#[test]
fn latest_date_of_empty_table_is_none() {
    assert_eq!(latest_date(&[]), None);
}

#[test]
fn rows_on_filters_by_date() {
    let rows = flatten(&sample_history());
    let latest = rows_on(&rows, date(2024, 2, 1));

    assert_eq!(latest.len(), 2);
    assert!(latest.iter().all(|r| r.date == date(2024, 2, 1)));
    assert_eq!(latest[0].sector, "Meme");
    assert_eq!(latest[1].sector, "DeFi");
}

#[test]
fn table_rows_serialize_with_display_headers() {
    let rows = flatten(&sample_history());
    let value = serde_json::to_value(&rows[0]).unwrap();

    assert_eq!(value["Date"], "2024-01-01");
    assert_eq!(value["Sector"], "DeFi");
    assert_eq!(value["Market Cap"], 1000.0);
    assert_eq!(value["24h Change (%)"], 2.5);
}
