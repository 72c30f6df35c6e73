//! Market data download from the CoinGecko categories endpoint.
//!
//! One GET per call, no retries. Anything other than `200 OK` is an error.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config;
use crate::error::{Result, SectorCapError};
use crate::models::Category;

/// Source of the current per-category market figures.
pub trait Fetcher {
    fn fetch(&mut self) -> Result<Vec<Category>>;
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn fetch(&mut self) -> Result<Vec<Category>> {
        (**self).fetch()
    }
}

/// Fetches categories from the CoinGecko API over blocking HTTP.
pub struct CoinGeckoFetcher {
    /// Endpoint queried on every fetch.
    pub url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl CoinGeckoFetcher {
    /// Create a fetcher for `url` whose requests give up after `timeout`.
    ///
    /// The HTTP client is built on first use, not here.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<&Client> {
        let client = match self.client.take() {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .user_agent(config::USER_AGENT)
                .build()?,
        };
        Ok(self.client.insert(client))
    }
}

impl Default for CoinGeckoFetcher {
    fn default() -> Self {
        Self::new(config::CATEGORIES_URL, config::DEFAULT_TIMEOUT)
    }
}

impl Fetcher for CoinGeckoFetcher {
    fn fetch(&mut self) -> Result<Vec<Category>> {
        let url = self.url.clone();
        debug!(%url, "Requesting categories");

        let resp = self.client()?.get(&url).send()?;
        let status = resp.status();
        if status != StatusCode::OK {
            warn!(%url, status = status.as_u16(), "Market data API refused request");
            return Err(SectorCapError::Status(status.as_u16()));
        }

        let body = resp.bytes()?;
        let categories: Vec<Category> =
            serde_json::from_slice(&body).map_err(SectorCapError::Decode)?;
        debug!(count = categories.len(), "Received categories");
        Ok(categories)
    }
}
