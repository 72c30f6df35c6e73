//! Flattening of the nested snapshot history into table rows.

use chrono::NaiveDate;

use crate::models::{Snapshot, TableRow};

/// One row per (snapshot, category) pair, in history order.
pub fn flatten(history: &[Snapshot]) -> Vec<TableRow> {
    history
        .iter()
        .flat_map(|snapshot| {
            snapshot.categories.iter().map(move |point| TableRow {
                date: snapshot.date,
                sector: point.sector.clone(),
                market_cap: point.market_cap_f64(),
                change_24h: point.change_24h_f64(),
            })
        })
        .collect()
}

/// Most recent date present in the table, or `None` when it is empty.
pub fn latest_date(rows: &[TableRow]) -> Option<NaiveDate> {
    rows.iter().map(|row| row.date).max()
}

/// Rows recorded on `date`, in table order.
pub fn rows_on(rows: &[TableRow], date: NaiveDate) -> Vec<TableRow> {
    rows.iter().filter(|row| row.date == date).cloned().collect()
}
