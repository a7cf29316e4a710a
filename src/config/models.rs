// src/config/models.rs
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config file extension must not be empty")]
    EmptyExtension,

    #[error("Config file extension must be given without a leading dot: {0}")]
    DottedExtension(String),

    #[error("Marker token for {0} must not be empty")]
    EmptyMarker(&'static str),

    #[error("Probe timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Default)]
pub struct InspectorConfig {
    pub scan: ScanConfig,
    pub probe: ProbeConfig,
}

impl InspectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scan.validate()?;
        self.probe.validate()?;
        Ok(())
    }
}

/// Controls which files the scanner picks up and how directives are read.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Extension of vhost files, without the dot.
    pub extension: String,
    /// `root` values containing this token belong to other directives
    /// (e.g. a `fastcgi_param` line) and are skipped.
    pub root_exclude_marker: String,
    /// Argument of `listen` that turns TLS on.
    pub tls_marker: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "conf".to_string(),
            root_exclude_marker: "SCRIPT_FILENAME".to_string(),
            tls_marker: "ssl".to_string(),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        if self.extension.starts_with('.') {
            return Err(ConfigError::DottedExtension(self.extension.clone()));
        }
        if self.root_exclude_marker.is_empty() {
            return Err(ConfigError::EmptyMarker("root"));
        }
        if self.tls_marker.is_empty() {
            return Err(ConfigError::EmptyMarker("listen"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
    pub follow_redirects: bool,
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            accept_invalid_certs: true,
            follow_redirects: false,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
