// src/health/mod.rs
mod checker;
mod status;

pub use checker::{HealthProbe, ProbeError, ProbeOutcome, SiteProbe};
pub use status::{HealthStatus, HEALTHY_STATUS_RANGE};
