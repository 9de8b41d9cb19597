// File: src/lib.rs
//
// Library interface for the vmbench driver.
// Exposes modules for integration testing and external use.

pub mod aggregate;
pub mod baseline;
pub mod config;
pub mod errors;
pub mod overhead;
pub mod pipeline;
pub mod reporter;
pub mod runner;
pub mod score;
