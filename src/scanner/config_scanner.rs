// src/scanner/config_scanner.rs
use super::directives::{DirectiveSet, VhostFields};
use crate::config::{ConfigError, ScanConfig};
use crate::site::SiteRecord;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid scan configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Debug, Clone)]
pub struct ConfigScanner {
    config: ScanConfig,
}

impl ConfigScanner {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parse every vhost file in `dir` into a `SiteRecord`, numbered from 1
    /// in file name order.
    pub async fn scan<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<SiteRecord>, ScanError> {
        let files = self.list_config_files(dir.as_ref()).await?;
        info!("Found {} vhost file(s) in {}", files.len(), dir.as_ref().display());

        let mut records = Vec::with_capacity(files.len());
        for (index, path) in files.into_iter().enumerate() {
            records.push(self.read_record(index + 1, path).await);
        }

        Ok(records)
    }

    /// Sorted, absolute paths of the files in `dir` carrying the configured
    /// extension.
    pub async fn list_config_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let read_dir_err = |source| ScanError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        match tokio::fs::metadata(dir).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
            }
            Err(e) => return Err(read_dir_err(e)),
            Ok(meta) if !meta.is_dir() => {
                return Err(ScanError::NotADirectory(dir.to_path_buf()));
            }
            Ok(_) => {}
        }

        let base = tokio::fs::canonicalize(dir).await.map_err(read_dir_err)?;
        let mut entries = tokio::fs::read_dir(&base).await.map_err(read_dir_err)?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
            let path = base.join(entry.file_name());
            if !self.has_config_extension(&path) {
                continue;
            }

            // Follows symlinks, as sites-enabled/ entries usually are.
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => debug!("Skipping non-file entry {}", path.display()),
                Err(e) => debug!("Skipping unreadable entry {}: {}", path.display(), e),
            }
        }

        files.sort();
        Ok(files)
    }

    fn has_config_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.config.extension.as_str())
    }

    async fn read_record(&self, sequence_id: usize, path: PathBuf) -> SiteRecord {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut record = SiteRecord::new(sequence_id, path, name);

        match tokio::fs::read(&record.source_path).await {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                let directives = DirectiveSet::parse(&text);
                debug!(
                    site = %record.name,
                    directives = directives.len(),
                    "Parsed {}",
                    record.source_path.display()
                );
                VhostFields::from_directives(&directives, &self.config).apply_to(&mut record);
            }
            Err(e) => {
                warn!(
                    site = %record.name,
                    "Failed to read {}: {}",
                    record.source_path.display(),
                    e
                );
            }
        }

        record
    }
}
