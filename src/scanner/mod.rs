// src/scanner/mod.rs
mod config_scanner;
mod directives;
mod tokenizer;

pub use config_scanner::{ConfigScanner, ScanError};
pub use directives::{DirectiveSet, VhostFields};
pub use tokenizer::{tokenize, Directive};
