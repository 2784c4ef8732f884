//! Single-shot probe clients for both transport protocols

pub mod h2;
pub mod h3;

use crate::config::ProbeConfig;
use crate::logging::Logger;
use crate::models::{ProbeOutcome, Protocol};
use tokio::time::timeout;

/// Issue one timed GET request.
///
/// Request failures and timeouts are data, not process errors: both map to
/// an unsuccessful outcome with the sentinel zero elapsed time.
pub async fn run_probe(config: &ProbeConfig, logger: &Logger) -> ProbeOutcome {
    logger.debug(&format!(
        "probing {} over {} (timeout {}s)",
        config.url,
        config.protocol,
        config.timeout.as_secs()
    ));

    let request = async {
        match config.protocol {
            Protocol::Http2 => h2::probe(config).await,
            Protocol::Http3 => h3::probe(config).await,
        }
    };

    match timeout(config.timeout, request).await {
        Ok(Ok(outcome)) => {
            logger.info(&format!(
                "{} {} in {} ({} bytes)",
                config.protocol,
                outcome.http_status,
                outcome.format_time(),
                outcome.bytes_read
            ));
            outcome
        }
        Ok(Err(e)) => {
            logger.warn(&format!("{} probe failed: {}", config.protocol, e));
            ProbeOutcome::failed(config.protocol, e.to_string())
        }
        Err(_) => {
            logger.warn(&format!(
                "{} probe timed out after {}s",
                config.protocol,
                config.timeout.as_secs()
            ));
            ProbeOutcome::timed_out(config.protocol, config.timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeOutputFormat;
    use std::time::Duration;
    use url::Url;

    fn unroutable_config(protocol: Protocol) -> ProbeConfig {
        // TEST-NET-1 address, nothing listens there.
        ProbeConfig {
            url: Url::parse("https://192.0.2.1:9/data").unwrap(),
            protocol,
            timeout: Duration::from_secs(1),
            insecure: true,
            output: ProbeOutputFormat::Time,
        }
    }

    #[tokio::test]
    async fn test_unreachable_h2_probe_yields_sentinel() {
        let logger = Logger::default();
        let outcome = run_probe(&unroutable_config(Protocol::Http2), &logger).await;
        assert!(!outcome.success);
        assert_eq!(outcome.format_time(), "0.000000");
        assert!(outcome.error_message.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_h3_probe_yields_sentinel() {
        let logger = Logger::default();
        let outcome = run_probe(&unroutable_config(Protocol::Http3), &logger).await;
        assert!(!outcome.success);
        assert_eq!(outcome.time_total(), 0.0);
    }
}
