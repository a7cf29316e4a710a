// src/lib.rs
pub mod config;
pub mod health;
pub mod inspector;
pub mod report;
pub mod scanner;
pub mod site;

pub use inspector::{InspectError, Inspector};
