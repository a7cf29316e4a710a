// src/site/record.rs
use crate::health::{HealthStatus, ProbeOutcome};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// One parsed vhost file plus the result of probing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub sequence_id: usize,
    pub source_path: PathBuf,
    pub name: String,
    pub document_root: Option<String>,
    pub index_file: Option<String>,
    pub tls_enabled: bool,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,

    // Probe state
    health: HealthStatus,
    status_code: u16,
    checked_at: Option<DateTime<Utc>>,
}

impl SiteRecord {
    pub fn new(sequence_id: usize, source_path: PathBuf, name: String) -> Self {
        Self {
            sequence_id,
            source_path,
            name,
            document_root: None,
            index_file: None,
            tls_enabled: false,
            tls_cert_path: None,
            tls_key_path: None,
            health: HealthStatus::Unknown,
            status_code: 0,
            checked_at: None,
        }
    }

    pub fn health(&self) -> HealthStatus {
        self.health
    }

    pub fn is_healthy(&self) -> bool {
        self.health.is_healthy()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        self.checked_at
    }

    /// Only the health fields change; everything parsed from the file stays put.
    pub fn apply_probe(&mut self, outcome: &ProbeOutcome) {
        self.health = if outcome.healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        self.status_code = outcome.status_code;
        self.checked_at = Some(Utc::now());
    }
}
