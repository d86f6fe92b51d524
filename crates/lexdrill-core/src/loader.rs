//! Dataset retrieval.
//!
//! Fetches the concept list and every probe language from a [`DataSource`]
//! with per-request timeouts, then normalizes. Retrieval failures degrade to
//! the embedded dataset unless that is disabled; a missing padding list is
//! always fatal.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::timeout;

use crate::dataset::{normalize, Dataset};
use crate::error::DrillError;
use crate::fallback::{embedded_dataset, FallbackLexicon};
use crate::languages::known_codes;
use crate::parser::RawWordRecord;
use crate::traits::DataSource;

/// Retrieval options.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub concept_timeout: Duration,
    pub language_timeout: Duration,
    /// Codes to probe, in preference order.
    pub languages: Vec<String>,
    /// Substitute the embedded dataset when the concept list cannot be
    /// fetched or no language is usable.
    pub embedded_fallback: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            concept_timeout: Duration::from_millis(3000),
            language_timeout: Duration::from_millis(2000),
            languages: known_codes(),
            embedded_fallback: true,
        }
    }
}

/// A loaded dataset plus what went wrong on the way.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    /// Recoverable problem to show the user.
    pub notice: Option<DrillError>,
    /// The embedded dataset replaced the retrieved one.
    pub used_fallback: bool,
}

/// Retrieve and normalize a dataset.
pub async fn load_dataset(
    source: Arc<dyn DataSource>,
    options: &LoadOptions,
    fallback: &FallbackLexicon,
) -> Result<LoadOutcome, DrillError> {
    let concepts = match timeout(options.concept_timeout, source.fetch_concept_list()).await {
        Ok(Ok(concepts)) => concepts,
        Ok(Err(e)) => {
            return recover(
                options,
                DrillError::DataRetrievalFailure(format!(
                    "concept list from {}: {e:#}",
                    source.name()
                )),
            )
        }
        Err(_) => {
            return recover(
                options,
                DrillError::DataRetrievalFailure(format!(
                    "concept list from {} timed out after {}ms",
                    source.name(),
                    options.concept_timeout.as_millis()
                )),
            )
        }
    };
    tracing::info!("loaded {} concepts from {}", concepts.len(), source.name());

    let lists = fetch_languages(source, options).await;

    match normalize(concepts, lists, fallback) {
        Ok(dataset) => {
            tracing::info!(
                "loaded {} languages: {}",
                dataset.language_count(),
                dataset.languages().collect::<Vec<_>>().join(", ")
            );
            Ok(LoadOutcome {
                dataset,
                notice: None,
                used_fallback: false,
            })
        }
        Err(e @ DrillError::NoUsableLanguageData) => recover(options, e),
        Err(e) => {
            tracing::error!("cannot build dataset: {e}");
            Err(e)
        }
    }
}

/// Fetch every probe language concurrently. Failed, timed-out and empty
/// lists are dropped; the rest keep probe order.
async fn fetch_languages(
    source: Arc<dyn DataSource>,
    options: &LoadOptions,
) -> Vec<(String, Vec<RawWordRecord>)> {
    let mut futures = FuturesUnordered::new();
    for (position, code) in options.languages.iter().enumerate() {
        let source = Arc::clone(&source);
        let code = code.clone();
        let limit = options.language_timeout;
        futures.push(async move {
            let result = timeout(limit, source.fetch_language_list(&code)).await;
            (position, code, result)
        });
    }

    let mut loaded = Vec::new();
    while let Some((position, code, result)) = futures.next().await {
        match result {
            Ok(Ok(words)) if words.is_empty() => {
                tracing::warn!("dropping '{code}': empty word list");
            }
            Ok(Ok(words)) => {
                tracing::debug!("loaded {} words for '{code}'", words.len());
                loaded.push((position, code, words));
            }
            Ok(Err(e)) => tracing::warn!("dropping '{code}': {e:#}"),
            Err(_) => tracing::warn!(
                "dropping '{code}': timed out after {}ms",
                options.language_timeout.as_millis()
            ),
        }
    }

    loaded.sort_by_key(|(position, _, _)| *position);
    loaded
        .into_iter()
        .map(|(_, code, words)| (code, words))
        .collect()
}

/// Substitute the embedded dataset, or give up when that is disabled.
fn recover(options: &LoadOptions, notice: DrillError) -> Result<LoadOutcome, DrillError> {
    if !options.embedded_fallback {
        tracing::error!("cannot build dataset: {notice}");
        return Err(notice);
    }
    tracing::warn!("{notice}; using the embedded vocabulary");
    Ok(LoadOutcome {
        dataset: embedded_dataset(),
        notice: Some(notice),
        used_fallback: true,
    })
}
