// src/inspector.rs
use crate::config::{ConfigError, InspectorConfig};
use crate::health::{HealthProbe, ProbeError, SiteProbe};
use crate::scanner::{ConfigScanner, ScanError};
use crate::site::SiteRecord;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Scan a vhost directory, then probe each site once, in scan order.
pub struct Inspector {
    scanner: ConfigScanner,
    probe: Arc<dyn SiteProbe>,
}

impl Inspector {
    pub fn new(scanner: ConfigScanner, probe: Arc<dyn SiteProbe>) -> Self {
        Self { scanner, probe }
    }

    pub fn from_config(config: &InspectorConfig) -> Result<Self, InspectError> {
        config.validate()?;
        let scanner = ConfigScanner::new(config.scan.clone())?;
        let probe = Arc::new(HealthProbe::new(&config.probe)?);
        Ok(Self::new(scanner, probe))
    }

    #[instrument(name = "inspect", skip(self, dir), fields(run_id = %Uuid::new_v4(), dir = %dir.display()))]
    pub async fn run(&self, dir: &Path) -> Result<Vec<SiteRecord>, ScanError> {
        let mut records = self.scanner.scan(dir).await?;

        for record in records.iter_mut() {
            let outcome = self.probe.probe(&record.name, record.tls_enabled).await;
            record.apply_probe(&outcome);
            debug!(
                site = %record.name,
                status = record.status_code(),
                checked_at = ?record.checked_at(),
                "Recorded probe result"
            );
        }

        let healthy = records.iter().filter(|r| r.is_healthy()).count();
        info!(
            "Inspection complete: {} healthy, {} unhealthy",
            healthy,
            records.len() - healthy
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::health::ProbeOutcome;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers 200 for names in `up`, records every call.
    struct FakeProbe {
        up: Vec<&'static str>,
        calls: Mutex<Vec<(String, bool)>>,
    }

    #[async_trait]
    impl SiteProbe for FakeProbe {
        async fn probe(&self, name: &str, tls: bool) -> ProbeOutcome {
            self.calls.lock().unwrap().push((name.to_string(), tls));
            if self.up.contains(&name) {
                ProbeOutcome::from_status_code(200)
            } else {
                ProbeOutcome::unreachable()
            }
        }
    }

    #[tokio::test]
    async fn test_each_site_probed_once_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.conf"), "listen 443 ssl;").unwrap();
        std::fs::write(dir.path().join("a.conf"), "listen 80;").unwrap();

        let probe = Arc::new(FakeProbe {
            up: vec!["b"],
            calls: Mutex::new(Vec::new()),
        });
        let scanner = ConfigScanner::new(ScanConfig::default()).unwrap();
        let inspector = Inspector::new(scanner, probe.clone());

        let records = inspector.run(dir.path()).await.unwrap();

        assert_eq!(
            *probe.calls.lock().unwrap(),
            vec![("a".to_string(), false), ("b".to_string(), true)]
        );
        assert!(!records[0].is_healthy());
        assert_eq!(records[0].status_code(), 0);
        assert!(records[1].is_healthy());
        assert_eq!(records[1].status_code(), 200);
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let mut config = InspectorConfig::default();
        config.probe.timeout_secs = 0;

        assert!(matches!(
            Inspector::from_config(&config),
            Err(InspectError::Config(ConfigError::ZeroTimeout))
        ));
    }

    #[tokio::test]
    async fn test_missing_directory_probes_nothing() {
        let probe = Arc::new(FakeProbe {
            up: vec![],
            calls: Mutex::new(Vec::new()),
        });
        let scanner = ConfigScanner::new(ScanConfig::default()).unwrap();
        let inspector = Inspector::new(scanner, probe.clone());

        let err = inspector
            .run(Path::new("/definitely/not/a/vhost/dir"))
            .await
            .unwrap_err();

        assert!(matches!(err, ScanError::DirectoryNotFound(_)));
        assert!(probe.calls.lock().unwrap().is_empty());
    }
}
