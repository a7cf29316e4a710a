// src/site/mod.rs
mod record;

pub use record::SiteRecord;
