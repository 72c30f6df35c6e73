use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TableRow: denormalized (date, sector) row of the flat table
// ---------------------------------------------------------------------------

/// One row of the flat table shown on the dashboard.
///
/// Serialized with the column headers the table view displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "Date", with = "super::snapshot::date_key")]
    pub date: NaiveDate,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Market Cap")]
    pub market_cap: Option<f64>,
    #[serde(rename = "24h Change (%)")]
    pub change_24h: Option<f64>,
}
