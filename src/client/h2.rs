//! HTTP/2 probe built on reqwest with rustls

use crate::config::ProbeConfig;
use crate::error::Result;
use crate::models::ProbeOutcome;
use std::time::Instant;

/// Issue one GET request with HTTP/2 enforced and report the timing.
///
/// The caller applies the wall-clock deadline; the client timeout here is
/// only a backstop for connection setup.
pub async fn probe(config: &ProbeConfig) -> Result<ProbeOutcome> {
    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .http2_prior_knowledge()
        .danger_accept_invalid_certs(config.insecure)
        .timeout(config.timeout)
        .build()?;

    let start = Instant::now();
    let response = client.get(config.url.clone()).send().await?;
    let status = response.status().as_u16();
    let version = format!("{:?}", response.version());
    let body = response.bytes().await?;
    let elapsed = start.elapsed();

    Ok(ProbeOutcome::success(
        config.protocol,
        elapsed,
        status,
        body.len() as u64,
        version,
    ))
}
