//! In-memory source for tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use lexdrill_core::fallback::{embedded_concepts, FallbackLexicon};
use lexdrill_core::model::Concept;
use lexdrill_core::parser::RawWordRecord;
use lexdrill_core::traits::DataSource;

use crate::error::SourceError;

/// A data source serving fixed documents from memory.
///
/// Languages without a registered list answer with [`SourceError::NotFound`].
pub struct MockSource {
    concepts: Option<Vec<Concept>>,
    lists: HashMap<String, Vec<RawWordRecord>>,
    delays: HashMap<String, Duration>,
    concept_calls: AtomicU32,
    language_calls: AtomicU32,
}

impl MockSource {
    /// A source with the given concept list and no languages.
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self {
            concepts: Some(concepts),
            lists: HashMap::new(),
            delays: HashMap::new(),
            concept_calls: AtomicU32::new(0),
            language_calls: AtomicU32::new(0),
        }
    }

    /// A source whose concept list cannot be fetched.
    pub fn unavailable() -> Self {
        let mut source = Self::new(Vec::new());
        source.concepts = None;
        source
    }

    /// A source serving the embedded vocabulary.
    pub fn embedded() -> Self {
        let lexicon = FallbackLexicon::embedded();
        let mut source = Self::new(embedded_concepts());
        for code in lexicon.languages() {
            if let Some(words) = lexicon.get(code) {
                let records = words
                    .iter()
                    .map(|w| RawWordRecord::new(w.surface_form.clone(), w.pronunciation.clone()))
                    .collect();
                source.lists.insert(code.to_string(), records);
            }
        }
        source
    }

    pub fn with_language(mut self, code: &str, words: Vec<RawWordRecord>) -> Self {
        self.lists.insert(code.to_string(), words);
        self
    }

    /// Delay every answer for `code` (use `"concepts"` for the concept list).
    pub fn with_delay(mut self, document: &str, delay: Duration) -> Self {
        self.delays.insert(document.to_string(), delay);
        self
    }

    pub fn concept_calls(&self) -> u32 {
        self.concept_calls.load(Ordering::Relaxed)
    }

    pub fn language_calls(&self) -> u32 {
        self.language_calls.load(Ordering::Relaxed)
    }

    async fn pause(&self, document: &str) {
        if let Some(delay) = self.delays.get(document) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl DataSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_concept_list(&self) -> anyhow::Result<Vec<Concept>> {
        self.concept_calls.fetch_add(1, Ordering::Relaxed);
        self.pause("concepts").await;
        self.concepts
            .clone()
            .ok_or_else(|| SourceError::NotFound("data/concept.json".into()).into())
    }

    async fn fetch_language_list(&self, code: &str) -> anyhow::Result<Vec<RawWordRecord>> {
        self.language_calls.fetch_add(1, Ordering::Relaxed);
        self.pause(code).await;
        self.lists
            .get(code)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("languages/{code}.json")).into())
    }
}
