//! lexdrill-sources: where vocabulary documents come from.
//!
//! Implements the `DataSource` trait for a data directory on disk, an HTTP
//! base URL and an in-memory mock, plus configuration loading.

pub mod config;
pub mod directory;
pub mod error;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config, load_config_from, LexdrillConfig, SourceConfig};
pub use error::SourceError;
