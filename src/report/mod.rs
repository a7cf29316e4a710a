// src/report/mod.rs
use crate::site::SiteRecord;
use std::fmt;
use std::io::{self, Write};

/// One status line for a probed site.
pub struct ReportLine<'a>(pub &'a SiteRecord);

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let site = self.0;
        write!(
            f,
            "Server ID: {}, Name: {}, Root: {}, Index: {}, SSL: {}, Status: {} ({})",
            site.sequence_id,
            site.name,
            site.document_root.as_deref().unwrap_or(""),
            site.index_file.as_deref().unwrap_or(""),
            if site.tls_enabled { "enabled" } else { "disabled" },
            site.health().as_str(),
            site.status_code(),
        )
    }
}

pub fn write_report<W: Write>(out: &mut W, records: &[SiteRecord]) -> io::Result<()> {
    for record in records {
        writeln!(out, "{}", ReportLine(record))?;
    }
    out.flush()
}
