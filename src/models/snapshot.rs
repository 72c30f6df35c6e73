use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::category::Category;

// ---------------------------------------------------------------------------
// CategoryPoint: one sector's figures within a snapshot
// ---------------------------------------------------------------------------

/// Figures are kept as JSON numbers rather than `f64` so a stored `1000`
/// is written back as `1000`, not `1000.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub sector: String,
    pub market_cap: Option<Number>,
    pub market_cap_change_24h: Option<Number>,
}

impl CategoryPoint {
    /// Non-finite figures are stored as `null`.
    pub fn new(sector: impl Into<String>, market_cap: f64, market_cap_change_24h: f64) -> Self {
        Self {
            sector: sector.into(),
            market_cap: Number::from_f64(market_cap),
            market_cap_change_24h: Number::from_f64(market_cap_change_24h),
        }
    }

    pub fn market_cap_f64(&self) -> Option<f64> {
        self.market_cap.as_ref().and_then(Number::as_f64)
    }

    pub fn change_24h_f64(&self) -> Option<f64> {
        self.market_cap_change_24h.as_ref().and_then(Number::as_f64)
    }
}

impl From<Category> for CategoryPoint {
    fn from(category: Category) -> Self {
        Self {
            sector: category.name,
            market_cap: category.market_cap,
            market_cap_change_24h: category.market_cap_change_24h,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot: one calendar day of sector data
// ---------------------------------------------------------------------------

/// All sector figures recorded for one calendar day.
///
/// `date` is the unique key of the persisted history and is written as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(with = "date_key")]
    pub date: NaiveDate,
    pub categories: Vec<CategoryPoint>,
}

impl Snapshot {
    pub fn new(date: NaiveDate, categories: Vec<CategoryPoint>) -> Self {
        Self { date, categories }
    }
}

/// Serde adapter pinning dates to [`DATE_FORMAT`](crate::config::DATE_FORMAT).
pub(crate) mod date_key {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::config::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let date = NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(de::Error::custom)?;
        // chrono accepts unpadded fields; "2024-3-1" is a different key.
        if date.format(DATE_FORMAT).to_string() != raw {
            return Err(de::Error::custom(format!(
                "date {raw:?} is not in zero-padded YYYY-MM-DD form"
            )));
        }
        Ok(date)
    }
}
