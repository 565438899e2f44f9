//! Data models for extracted records, validation reports and configuration.

pub mod config;
pub mod record;
pub mod report;
