//! lexdrill-core: vocabulary dataset, conjugation and quiz session engine.
//!
//! This crate defines the data model, document decoding, dataset
//! normalization, the quiz state machine and its scoring. Data sources and
//! the terminal front end live in sibling crates.

pub mod conjugation;
pub mod dataset;
pub mod error;
pub mod fallback;
pub mod languages;
pub mod loader;
pub mod model;
pub mod parser;
pub mod session;
pub mod statistics;
pub mod timer;
pub mod traits;
pub mod view;

pub use error::DrillError;
pub use session::{DrillSession, Intent, SessionConfig, Transition};
