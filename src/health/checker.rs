// src/health/checker.rs
use super::status::HealthStatus;
use crate::config::{ConfigError, ProbeConfig};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid probe URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid probe configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// What a single probe saw. `status_code` is 0 when no response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub healthy: bool,
    pub status_code: u16,
}

impl ProbeOutcome {
    pub fn unreachable() -> Self {
        Self {
            healthy: false,
            status_code: 0,
        }
    }

    pub fn from_status_code(status_code: u16) -> Self {
        Self {
            healthy: HealthStatus::from_status_code(status_code).is_healthy(),
            status_code,
        }
    }
}

#[async_trait]
pub trait SiteProbe: Send + Sync {
    /// Check `name` once, over https when `tls` is set. Never fails: transport
    /// errors come back as an unreachable outcome.
    async fn probe(&self, name: &str, tls: bool) -> ProbeOutcome;
}

/// Reachability check over HTTP(S). One GET per call, no retries, body ignored.
pub struct HealthProbe {
    client: Client,
}

impl HealthProbe {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        config.validate()?;

        let redirect = if config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .redirect(redirect)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ProbeError::ClientBuild)?;

        Ok(Self { client })
    }

    pub fn probe_url(name: &str, tls: bool) -> Result<Url, ProbeError> {
        let url = format!("{}://{}", if tls { "https" } else { "http" }, name);
        Url::parse(&url).map_err(|source| ProbeError::InvalidUrl { url, source })
    }

    /// Status code of a single GET, or the error that prevented a response.
    pub async fn fetch_status(&self, name: &str, tls: bool) -> Result<u16, ProbeError> {
        let url = Self::probe_url(name, tls)?;

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| ProbeError::Transport {
                url: url.to_string(),
                source,
            })?;

        // Dropping the response discards the body unread.
        Ok(response.status().as_u16())
    }
}

#[async_trait]
impl SiteProbe for HealthProbe {
    async fn probe(&self, name: &str, tls: bool) -> ProbeOutcome {
        let start = Instant::now();

        let outcome = match self.fetch_status(name, tls).await {
            Ok(status_code) => ProbeOutcome::from_status_code(status_code),
            Err(e) => {
                warn!(site = %name, "Health probe failed: {}", e);
                ProbeOutcome::unreachable()
            }
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        if outcome.healthy {
            info!(site = %name, status = outcome.status_code, elapsed_ms, "Site is healthy");
        } else {
            debug!(site = %name, status = outcome.status_code, elapsed_ms, "Site is unhealthy");
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn probe() -> HealthProbe {
        HealthProbe::new(&ProbeConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_ok_is_healthy() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("hello")
            .expect(1)
            .create_async()
            .await;

        let outcome = probe().probe(&server.host_with_port(), false).await;

        assert_eq!(
            outcome,
            ProbeOutcome {
                healthy: true,
                status_code: 200
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_redirect_is_not_followed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(301)
            .with_header("location", "/elsewhere")
            .create_async()
            .await;
        let never = server
            .mock("GET", "/elsewhere")
            .expect(0)
            .create_async()
            .await;

        let outcome = probe().probe(&server.host_with_port(), false).await;

        assert!(outcome.healthy);
        assert_eq!(outcome.status_code, 301);
        never.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_unhealthy() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/").with_status(503).create_async().await;

        let outcome = probe().probe(&server.host_with_port(), false).await;

        assert!(!outcome.healthy);
        assert_eq!(outcome.status_code, 503);
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        // Bind then drop to get a port with nothing listening.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let outcome = probe().probe(&format!("127.0.0.1:{}", port), false).await;
        assert_eq!(outcome, ProbeOutcome::unreachable());
    }

    #[tokio::test]
    async fn test_invalid_name_is_unreachable() {
        let outcome = probe().probe("bad host name", true).await;
        assert_eq!(outcome, ProbeOutcome::unreachable());
    }

    #[test]
    fn test_probe_url_scheme() {
        assert_eq!(
            HealthProbe::probe_url("example.com", true).unwrap().as_str(),
            "https://example.com/"
        );
        assert_eq!(
            HealthProbe::probe_url("example.com", false).unwrap().as_str(),
            "http://example.com/"
        );
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = ProbeConfig {
            timeout_secs: 0,
            ..ProbeConfig::default()
        };
        assert!(matches!(
            HealthProbe::new(&config),
            Err(ProbeError::InvalidConfig(ConfigError::ZeroTimeout))
        ));
    }
}
