//! Collaborator traits.
//!
//! Data sources are implemented by the `lexdrill-sources` crate; displays
//! by the `lexdrill-cli` crate.

use async_trait::async_trait;

use crate::error::DrillError;
use crate::model::Concept;
use crate::parser::RawWordRecord;
use crate::statistics::SessionSummary;
use crate::view::TurnView;

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where concept and word-list documents come from.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable source name (e.g. "directory").
    fn name(&self) -> &str;

    /// Fetch and decode the concept list.
    async fn fetch_concept_list(&self) -> anyhow::Result<Vec<Concept>>;

    /// Fetch and decode the word list of one language.
    async fn fetch_language_list(&self, code: &str) -> anyhow::Result<Vec<RawWordRecord>>;
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Renders the view-model. Receives a fresh [`TurnView`] after every intent.
pub trait DrillDisplay {
    fn render(&mut self, view: &TurnView);

    /// Show a recoverable problem without ending the run.
    fn notice(&mut self, error: &DrillError);

    fn summary(&mut self, _summary: &SessionSummary) {}
}
