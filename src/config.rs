use std::time::Duration;

use chrono::{Local, NaiveDate};

/// CoinGecko endpoint listing every coin category with its aggregate market cap.
pub const CATEGORIES_URL: &str = "https://api.coingecko.com/api/v3/coins/categories";

/// History file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "marketcap_data.json";

/// Calendar date layout used as the snapshot key.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// CoinGecko rejects requests without a user agent.
pub const USER_AGENT: &str = concat!("sectorcap/", env!("CARGO_PKG_VERSION"));

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
