//! Test utility functions for integration tests
//!
//! Provides common utilities for test setup, logging, and waiting on mock
//! AMF events.

use std::time::Duration;

use gnbsim_common::{GnbConfig, LogLevel};
use tokio::time::timeout;
use tracing_subscriber::{fmt, EnvFilter};

use crate::mock_amf::{MockAmf, MockAmfEvent};

/// Result type for integration tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Default timeout for test operations
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Initialize logging for tests with optional filter
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "info"
pub fn init_test_logging() {
    init_test_logging_at(LogLevel::Info);
}

/// Initialize logging for tests at the level a gNB profile asks for
///
/// RUST_LOG still takes precedence over `config.log_level`.
pub fn init_test_logging_for(config: &GnbConfig) {
    init_test_logging_at(config.log_level);
}

fn init_test_logging_at(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Wait for the next event the mock AMF emitted
///
/// # Returns
/// * `Ok(event)` if an event arrived within [`DEFAULT_TEST_TIMEOUT`]
/// * `Err` if the timeout elapsed or the event channel closed
pub async fn next_event(amf: &MockAmf) -> TestResult<MockAmfEvent> {
    match timeout(DEFAULT_TEST_TIMEOUT, amf.next_event()).await {
        Ok(Some(event)) => Ok(event),
        Ok(None) => Err("Mock AMF event channel closed".into()),
        Err(_) => Err("No mock AMF event within timeout".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_next_event_times_out_without_traffic() {
        let amf = MockAmf::new();
        let result = tokio::time::timeout(Duration::from_millis(100), amf.next_event()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_init_test_logging_twice() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_init_test_logging_for_profile() {
        let config = GnbConfig::from_yaml(crate::TEST_GNB_YAML).expect("fixture profile");
        assert_eq!(config.log_level, LogLevel::Debug);
        init_test_logging_for(&config);
        init_test_logging();
    }
}
