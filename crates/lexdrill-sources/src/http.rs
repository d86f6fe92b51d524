//! Documents served over HTTP from a base URL.
//!
//! Same layout as a data directory: `{base}/data/concept.json` and
//! `{base}/languages/{code}.json`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use lexdrill_core::model::Concept;
use lexdrill_core::parser::{parse_concepts_str, parse_words_str, RawWordRecord};
use lexdrill_core::traits::DataSource;

use crate::error::SourceError;

/// Upper bound on a single request; the loader applies tighter limits.
const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Fetches documents from a web server.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()
            .map_err(|e| SourceError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, document: &str) -> Result<String, SourceError> {
        let url = format!("{}/{document}", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(REQUEST_TIMEOUT_MS)
            } else if e.is_connect() {
                SourceError::Network(format!("{} not reachable", self.base_url))
            } else {
                SourceError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(SourceError::NotFound(url));
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api { status, message });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("failed to read {url}: {e}")))
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_concept_list(&self) -> anyhow::Result<Vec<Concept>> {
        let document = "data/concept.json";
        let body = self.get(document).await?;
        parse_concepts_str(&body).map_err(|e| {
            SourceError::Malformed {
                document: document.to_string(),
                message: format!("{e:#}"),
            }
            .into()
        })
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_language_list(&self, code: &str) -> anyhow::Result<Vec<RawWordRecord>> {
        let document = format!("languages/{code}.json");
        let body = self.get(&document).await?;
        parse_words_str(&body).map_err(|e| {
            SourceError::Malformed {
                document,
                message: format!("{e:#}"),
            }
            .into()
        })
    }
}
