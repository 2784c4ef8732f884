//! HTTP/3 probe built on quinn and h3

use crate::config::ProbeConfig;
use crate::error::{AppError, Result};
use crate::models::ProbeOutcome;
use bytes::Buf;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// ALPN token for HTTP/3
const ALPN_H3: &[u8] = b"h3";

/// Issue one GET request over QUIC and report the timing
pub async fn probe(config: &ProbeConfig) -> Result<ProbeOutcome> {
    let host = config
        .url
        .host_str()
        .ok_or_else(|| AppError::validation("Probe URL has no host"))?
        .to_string();
    let port = config.port();

    let remote = resolve(&host, port).await?;
    let endpoint = build_endpoint(config, remote)?;

    let start = Instant::now();
    let connection = endpoint
        .connect(remote, &host)
        .map_err(|e| AppError::network(format!("QUIC connect setup failed: {}", e)))?
        .await
        .map_err(|e| AppError::network(format!("QUIC handshake failed: {}", e)))?;

    let (mut driver, mut send_request) =
        h3::client::new(h3_quinn::Connection::new(connection))
            .await
            .map_err(|e| AppError::network(format!("HTTP/3 setup failed: {}", e)))?;

    // The driver must be polled for the connection to make progress.
    let drive = tokio::spawn(async move {
        let _ = std::future::poll_fn(|cx| driver.poll_close(cx)).await;
    });

    let uri: http::Uri = config
        .url
        .as_str()
        .parse()
        .map_err(|e| AppError::parse(format!("Invalid request URI: {}", e)))?;
    let request = http::Request::builder()
        .uri(uri)
        .body(())
        .map_err(|e| AppError::internal(format!("Failed to build request: {}", e)))?;

    let mut stream = send_request
        .send_request(request)
        .await
        .map_err(|e| AppError::network(format!("HTTP/3 request failed: {}", e)))?;
    stream
        .finish()
        .await
        .map_err(|e| AppError::network(format!("HTTP/3 request failed: {}", e)))?;

    let response = stream
        .recv_response()
        .await
        .map_err(|e| AppError::network(format!("HTTP/3 response failed: {}", e)))?;
    let status = response.status().as_u16();

    let mut bytes_read: u64 = 0;
    while let Some(chunk) = stream
        .recv_data()
        .await
        .map_err(|e| AppError::network(format!("HTTP/3 body read failed: {}", e)))?
    {
        bytes_read += chunk.remaining() as u64;
    }
    let elapsed = start.elapsed();

    drive.abort();
    endpoint.close(0u32.into(), b"done");

    Ok(ProbeOutcome::success(
        config.protocol,
        elapsed,
        status,
        bytes_read,
        "HTTP/3".to_string(),
    ))
}

async fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await?
        .next()
        .ok_or_else(|| AppError::network(format!("No address found for {}", host)))
}

fn build_endpoint(config: &ProbeConfig, remote: SocketAddr) -> Result<quinn::Endpoint> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let builder = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_protocol_versions(&[&rustls::version::TLS13])
        .map_err(|e| AppError::internal(format!("TLS setup failed: {}", e)))?;

    let mut tls_config = if config.insecure {
        builder
            .dangerous()
            .with_custom_certificate_verifier(SkipServerVerification::new(provider))
            .with_no_client_auth()
    } else {
        let mut roots = rustls::RootCertStore::empty();
        for cert in rustls_native_certs::load_native_certs().certs {
            let _ = roots.add(cert);
        }
        builder.with_root_certificates(roots).with_no_client_auth()
    };
    tls_config.alpn_protocols = vec![ALPN_H3.to_vec()];

    let quic_config = quinn::crypto::rustls::QuicClientConfig::try_from(tls_config)
        .map_err(|e| AppError::internal(format!("QUIC TLS setup failed: {}", e)))?;
    let client_config = quinn::ClientConfig::new(Arc::new(quic_config));

    let bind: SocketAddr = if remote.is_ipv4() {
        "0.0.0.0:0"
    } else {
        "[::]:0"
    }
    .parse()
    .map_err(|e| AppError::internal(format!("Bind address parse failed: {}", e)))?;

    let mut endpoint = quinn::Endpoint::client(bind)?;
    endpoint.set_default_client_config(client_config);
    Ok(endpoint)
}

/// Certificate verifier that accepts any server certificate.
///
/// The benchmark rig runs against a local server with a self-signed
/// certificate, so `--insecure` mirrors what the harness does.
#[derive(Debug)]
struct SkipServerVerification(Arc<rustls::crypto::CryptoProvider>);

impl SkipServerVerification {
    fn new(provider: Arc<rustls::crypto::CryptoProvider>) -> Arc<Self> {
        Arc::new(Self(provider))
    }
}

impl rustls::client::danger::ServerCertVerifier for SkipServerVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.0.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.0.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        self.0
            .signature_verification_algorithms
            .supported_schemes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeOutputFormat;
    use crate::models::Protocol;
    use std::time::Duration;
    use url::Url;

    #[tokio::test]
    async fn test_endpoint_builds_for_insecure_config() {
        let config = ProbeConfig {
            url: Url::parse("https://localhost:4433/data").unwrap(),
            protocol: Protocol::Http3,
            timeout: Duration::from_secs(5),
            insecure: true,
            output: ProbeOutputFormat::Time,
        };
        let remote: SocketAddr = "127.0.0.1:4433".parse().unwrap();
        assert!(build_endpoint(&config, remote).is_ok());
    }

    #[tokio::test]
    async fn test_resolve_rejects_unknown_host() {
        assert!(resolve("host.invalid", 443).await.is_err());
    }
}
