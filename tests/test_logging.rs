//! Global subscriber installation.

#![cfg(feature = "dashboard")]

use sectorcap::logging::{init_logging, LogFormat, DEFAULT_FILTER};
use tracing_subscriber::EnvFilter;

#[test]
fn default_filter_parses() {
    assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
}

#[test]
fn second_init_is_an_error() {
    assert!(init_logging(LogFormat::Pretty).is_ok());
    assert!(init_logging(LogFormat::Json).is_err());
}
