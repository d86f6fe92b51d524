//! Concept and word-list document decoding.
//!
//! Accepts either a single JSON array or newline-delimited JSON records and
//! turns every accepted record shape into the canonical [`Concept`] /
//! [`WordEntry`] types. Nothing past this module looks at field aliases.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::conjugation::{Tense, WILDCARD_PERSON};
use crate::model::{placeholder_word, Concept, ConjugationTable, PartOfSpeech, WordEntry};

/// Icon used when a concept record carries none.
pub const UNKNOWN_ICON: &str = "❓";

#[derive(Debug, Default, Deserialize)]
struct RawConceptRecord {
    #[serde(default, rename = "type", alias = "part_of_speech", alias = "partOfSpeech")]
    kind: Option<String>,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

/// A word record as found in a language document, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "WordRecordShape")]
pub struct RawWordRecord {
    pub word: Option<String>,
    pub text: Option<String>,
    pub phonetic: Option<String>,
    pub pronunciation: Option<String>,
    pub forms: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordRecordShape {
    Bare(String),
    Structured(StructuredWordRecord),
}

#[derive(Deserialize)]
struct StructuredWordRecord {
    #[serde(default, alias = "surface_form", alias = "surfaceForm")]
    word: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    pronunciation: Option<String>,
    #[serde(default, alias = "conjugations")]
    forms: Option<serde_json::Value>,
}

impl From<WordRecordShape> for RawWordRecord {
    fn from(shape: WordRecordShape) -> Self {
        match shape {
            WordRecordShape::Bare(word) => RawWordRecord {
                word: Some(word),
                ..Default::default()
            },
            WordRecordShape::Structured(r) => RawWordRecord {
                word: r.word,
                text: r.text,
                phonetic: r.phonetic,
                pronunciation: r.pronunciation,
                forms: r.forms,
            },
        }
    }
}

impl RawWordRecord {
    /// Build a record from a surface form and pronunciation.
    pub fn new(word: impl Into<String>, phonetic: impl Into<String>) -> Self {
        Self {
            word: Some(word.into()),
            phonetic: Some(phonetic.into()),
            ..Default::default()
        }
    }

    /// Surface form this record would resolve to, if it has one.
    pub fn surface_form(&self) -> Option<&str> {
        non_blank(self.word.as_deref()).or_else(|| non_blank(self.text.as_deref()))
    }

    /// Resolve into the canonical entry for `language` at concept `index`.
    pub fn resolve(self, language: &str, index: usize) -> WordEntry {
        let surface_form = self
            .surface_form()
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_word(language, index));
        let pronunciation = non_blank(self.phonetic.as_deref())
            .or_else(|| non_blank(self.pronunciation.as_deref()))
            .unwrap_or_default()
            .to_string();
        let forms = self.forms.as_ref().and_then(decode_forms);

        WordEntry {
            surface_form,
            pronunciation,
            forms,
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Keep the string leaves of a `{tense: {person: form}}` object.
///
/// A tense given as a bare string is read as its wildcard form.
fn decode_forms(value: &serde_json::Value) -> Option<ConjugationTable> {
    let tenses = value.as_object()?;
    let mut table = ConjugationTable::new();
    for (tense, persons) in tenses {
        let mut forms = BTreeMap::new();
        match persons {
            serde_json::Value::Object(map) => {
                for (person, form) in map {
                    match form.as_str() {
                        Some(form) => {
                            forms.insert(person.clone(), form.to_string());
                        }
                        None => tracing::debug!("ignoring non-string form {tense}/{person}"),
                    }
                }
            }
            serde_json::Value::String(form) => {
                forms.insert(WILDCARD_PERSON.to_string(), form.clone());
            }
            _ => {
                tracing::debug!("ignoring malformed tense table '{tense}'");
                continue;
            }
        }
        table.insert(tense.clone(), forms);
    }
    if table.is_empty() {
        None
    } else {
        Some(table)
    }
}

/// Decode a document that is either one JSON array or one record per line.
fn parse_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("failed to parse JSON array");
    }

    trimmed
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line.trim())
                .with_context(|| format!("failed to parse record on line {}", n + 1))
        })
        .collect()
}

/// Parse a concept document into concepts indexed by position.
pub fn parse_concepts_str(content: &str) -> Result<Vec<Concept>> {
    let records: Vec<serde_json::Value> = parse_records(content)?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let r: RawConceptRecord = decode_record("concept", index, value);
            let part_of_speech = r
                .kind
                .as_deref()
                .map(|k| k.parse::<PartOfSpeech>().unwrap_or(PartOfSpeech::Noun))
                .unwrap_or(PartOfSpeech::Noun);
            let icon = non_blank(r.emoji.as_deref())
                .or_else(|| non_blank(r.icon.as_deref()))
                .unwrap_or(UNKNOWN_ICON)
                .to_string();
            Concept::new(index, part_of_speech, icon)
        })
        .collect())
}

/// Parse a word-list document into raw records.
///
/// A record of neither accepted shape becomes an empty record, which
/// resolves to a placeholder; only a syntax error fails the document.
pub fn parse_words_str(content: &str) -> Result<Vec<RawWordRecord>> {
    let records: Vec<serde_json::Value> = parse_records(content)?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, value)| decode_record("word", index, value))
        .collect())
}

fn decode_record<T: DeserializeOwned + Default>(
    kind: &str,
    index: usize,
    value: serde_json::Value,
) -> T {
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!("unusable {kind} record {index}, using defaults: {e}");
        T::default()
    })
}

/// Parse a concept document from disk.
pub fn parse_concept_file(path: &Path) -> Result<Vec<Concept>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read concept file: {}", path.display()))?;
    parse_concepts_str(&content).with_context(|| format!("in {}", path.display()))
}

/// Parse a word-list document from disk.
pub fn parse_word_file(path: &Path) -> Result<Vec<RawWordRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word list: {}", path.display()))?;
    parse_words_str(&content).with_context(|| format!("in {}", path.display()))
}

/// Path of the concept document inside a data directory.
pub fn concept_path(root: &Path) -> PathBuf {
    root.join("data").join("concept.json")
}

/// Path of a language's word list inside a data directory.
pub fn language_path(root: &Path, code: &str) -> PathBuf {
    root.join("languages").join(format!("{code}.json"))
}

/// Everything found in a data directory.
#[derive(Debug, Clone)]
pub struct DataDirectory {
    pub concepts: Vec<Concept>,
    /// Word lists keyed by language code, sorted by code.
    pub languages: Vec<(String, Vec<RawWordRecord>)>,
}

/// Load `data/concept.json` and every `languages/*.json` from a directory.
pub fn load_data_directory(root: &Path) -> Result<DataDirectory> {
    if !root.is_dir() {
        anyhow::bail!("not a directory: {}", root.display());
    }

    let concepts = parse_concept_file(&concept_path(root))?;

    let languages_dir = root.join("languages");
    let mut languages = Vec::new();
    for entry in std::fs::read_dir(&languages_dir)
        .with_context(|| format!("failed to read directory: {}", languages_dir.display()))?
    {
        let path = entry?.path();
        let is_word_list = path
            .extension()
            .is_some_and(|ext| ext == "json" || ext == "jsonl" || ext == "ndjson");
        let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_word_list {
            continue;
        }
        match parse_word_file(&path) {
            Ok(words) => languages.push((code.to_string(), words)),
            Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
        }
    }
    languages.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(DataDirectory {
        concepts,
        languages,
    })
}

/// A warning from word-list validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The language code (if applicable).
    pub language: Option<String>,
    /// The concept index (if applicable).
    pub index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a language's word list against the concept list.
pub fn validate_word_list(
    concepts: &[Concept],
    language: &str,
    words: &[RawWordRecord],
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |index: Option<usize>, message: String| ValidationWarning {
        language: Some(language.to_string()),
        index,
        message,
    };

    if words.is_empty() {
        warnings.push(warn(None, "word list is empty and will be ignored".into()));
        return warnings;
    }
    if words.len() < concepts.len() {
        warnings.push(warn(
            None,
            format!(
                "{} entries for {} concepts, will be padded from the fallback list",
                words.len(),
                concepts.len()
            ),
        ));
    } else if words.len() > concepts.len() {
        warnings.push(warn(
            None,
            format!(
                "{} entries for {} concepts, extra entries are never shown",
                words.len(),
                concepts.len()
            ),
        ));
    }

    for (index, (concept, record)) in concepts.iter().zip(words).enumerate() {
        if record.surface_form().is_none() {
            warnings.push(warn(Some(index), "missing word, a placeholder will be shown".into()));
        }
        let forms = record.forms.as_ref().and_then(decode_forms);
        match (&concept.part_of_speech, forms) {
            (PartOfSpeech::Verb, None) => {
                warnings.push(warn(Some(index), "verb has no conjugation forms".into()));
            }
            (PartOfSpeech::Verb, Some(table)) => {
                for tense in Tense::ALL {
                    if !table.contains_key(tense.key()) {
                        warnings.push(warn(
                            Some(index),
                            format!("verb has no '{}' forms", tense.key()),
                        ));
                    }
                }
            }
            (other, Some(_)) => {
                warnings.push(warn(
                    Some(index),
                    format!("conjugation forms on a {other} are ignored"),
                ));
            }
            (_, None) => {}
        }
    }

    warnings
}

/// Validate every word list in a data directory.
pub fn validate_data_directory(dir: &DataDirectory) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    if dir.concepts.is_empty() {
        warnings.push(ValidationWarning {
            language: None,
            index: None,
            message: "concept list is empty".into(),
        });
    }
    for (code, words) in &dir.languages {
        warnings.extend(validate_word_list(&dir.concepts, code, words));
    }
    warnings
}
