// src/health/status.rs
use std::ops::Range;

/// Status codes that count as a live site. Redirects are included: a vhost
/// that answers with a 301 is up.
pub const HEALTHY_STATUS_RANGE: Range<u16> = 200..400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    #[default]
    Unknown,
}

impl HealthStatus {
    pub fn from_status_code(status_code: u16) -> Self {
        if HEALTHY_STATUS_RANGE.contains(&status_code) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }

    pub fn is_healthy(&self) -> bool {
        *self == HealthStatus::Healthy
    }

    pub fn as_str(&self) -> &'static str {
        if self.is_healthy() {
            "healthy"
        } else {
            "unhealthy"
        }
    }
}
