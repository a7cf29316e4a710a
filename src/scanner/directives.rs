// src/scanner/directives.rs
use super::tokenizer::{tokenize, Directive};
use crate::config::ScanConfig;
use crate::site::SiteRecord;
use std::collections::HashMap;

/// All directives of one file, grouped by name in file order.
#[derive(Debug, Default)]
pub struct DirectiveSet {
    entries: HashMap<String, Vec<Directive>>,
}

impl DirectiveSet {
    pub fn parse(input: &str) -> Self {
        tokenize(input).into_iter().collect()
    }

    pub fn all(&self, name: &str) -> &[Directive] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Value of the last `name` directive accepted by `filter`. Empty values
    /// count as absent.
    pub fn last_value_where<F>(&self, name: &str, filter: F) -> Option<String>
    where
        F: Fn(&Directive) -> bool,
    {
        self.all(name)
            .iter()
            .rev()
            .find(|d| filter(d))
            .map(Directive::value)
            .filter(|v| !v.is_empty())
    }

    pub fn last_value(&self, name: &str) -> Option<String> {
        self.last_value_where(name, |_| true)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Directive> for DirectiveSet {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        let mut entries: HashMap<String, Vec<Directive>> = HashMap::new();
        for directive in iter {
            entries
                .entry(directive.name.clone())
                .or_default()
                .push(directive);
        }
        Self { entries }
    }
}

/// The fields a vhost file contributes to its `SiteRecord`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VhostFields {
    pub document_root: Option<String>,
    pub index_file: Option<String>,
    pub tls_enabled: bool,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
}

impl VhostFields {
    pub fn from_directives(set: &DirectiveSet, config: &ScanConfig) -> Self {
        let marker = config.root_exclude_marker.as_str();

        Self {
            document_root: set.last_value_where("root", |d| !d.value().contains(marker)),
            index_file: set.last_value("index"),
            tls_enabled: set
                .all("listen")
                .iter()
                .any(|d| d.has_arg(&config.tls_marker)),
            tls_cert_path: set.last_value("ssl_certificate"),
            tls_key_path: set.last_value("ssl_certificate_key"),
        }
    }

    pub fn apply_to(self, record: &mut SiteRecord) {
        record.document_root = self.document_root;
        record.index_file = self.index_file;
        record.tls_enabled = self.tls_enabled;
        record.tls_cert_path = self.tls_cert_path;
        record.tls_key_path = self.tls_key_path;
    }
}
