//! Configuration loading for the PoliMinder workspace

pub mod config;

pub use config::{ConfigLoader, ConfigSource, ConfigValidator};
