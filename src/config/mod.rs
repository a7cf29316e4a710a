// src/config/mod.rs
mod models;

pub use models::*;
