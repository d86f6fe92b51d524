//! Data directory on the local filesystem.
//!
//! Layout: `<root>/data/concept.json` and `<root>/languages/<code>.json`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use lexdrill_core::model::Concept;
use lexdrill_core::parser::{
    concept_path, language_path, parse_concepts_str, parse_words_str, RawWordRecord,
};
use lexdrill_core::traits::DataSource;

use crate::error::SourceError;

/// Reads documents from a data directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read(&self, path: &Path) -> Result<String, SourceError> {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.display().to_string())
            } else {
                SourceError::Io {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })
    }
}

#[async_trait]
impl DataSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch_concept_list(&self) -> anyhow::Result<Vec<Concept>> {
        let path = concept_path(&self.root);
        let content = self.read(&path).await?;
        parse_concepts_str(&content).map_err(|e| {
            SourceError::Malformed {
                document: path.display().to_string(),
                message: format!("{e:#}"),
            }
            .into()
        })
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch_language_list(&self, code: &str) -> anyhow::Result<Vec<RawWordRecord>> {
        let path = language_path(&self.root, code);
        let content = self.read(&path).await?;
        parse_words_str(&content).map_err(|e| {
            SourceError::Malformed {
                document: path.display().to_string(),
                message: format!("{e:#}"),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn reads_concepts_and_words() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "data/concept.json",
            r#"[{"type":"noun","emoji":"🏠"},{"type":"verb","emoji":"🏃"}]"#,
        );
        write(
            dir.path(),
            "languages/es.json",
            r#"[{"word":"casa","phonetic":"/ˈka.sa/"},{"word":"ir","forms":{"present":{"1sg":"voy"}}}]"#,
        );

        let source = DirectorySource::new(dir.path());
        let concepts = source.fetch_concept_list().await.unwrap();
        assert_eq!(concepts.len(), 2);
        assert_eq!(concepts[1].icon, "🏃");

        let words = source.fetch_language_list("es").await.unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].surface_form(), Some("casa"));
    }

    #[tokio::test]
    async fn missing_language_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        let err = source.fetch_language_list("fr").await.unwrap_err();
        let err = err.downcast::<SourceError>().unwrap();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "languages/de.json", "[{\"word\": ");
        let source = DirectorySource::new(dir.path());
        let err = source.fetch_language_list("de").await.unwrap_err();
        assert!(err.to_string().contains("malformed document"), "{err}");
    }
}
