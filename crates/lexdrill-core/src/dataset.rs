//! Dataset normalization.
//!
//! Aligns every retained language to the concept list: `entries.len()` equals
//! the number of concepts, and entry `i` realizes concept `i`. Short lists
//! are padded by cycling the language's fallback list, starting at the
//! position equal to the current length modulo the fallback length.

use crate::error::DrillError;
use crate::fallback::FallbackLexicon;
use crate::model::{Concept, WordEntry};
use crate::parser::RawWordRecord;

/// One language's word entries, aligned to the concept list.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageDataset {
    code: String,
    entries: Vec<WordEntry>,
}

impl LanguageDataset {
    pub fn new(code: impl Into<String>, entries: Vec<WordEntry>) -> Self {
        Self {
            code: code.into(),
            entries,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The validated, aligned, immutable vocabulary a session drills.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    concepts: Vec<Concept>,
    languages: Vec<LanguageDataset>,
}

impl Dataset {
    /// Assemble a dataset whose lists are already aligned.
    pub(crate) fn from_aligned(concepts: Vec<Concept>, languages: Vec<LanguageDataset>) -> Self {
        debug_assert!(languages.iter().all(|l| l.len() == concepts.len()));
        Self {
            concepts,
            languages,
        }
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn concept(&self, index: usize) -> Option<&Concept> {
        self.concepts.get(index)
    }

    /// Loaded language codes in load order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|l| l.code())
    }

    pub fn language(&self, code: &str) -> Option<&LanguageDataset> {
        self.languages.iter().find(|l| l.code == code)
    }

    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    pub fn has_language(&self, code: &str) -> bool {
        self.language(code).is_some()
    }

    /// The entry of `code` realizing concept `index`.
    pub fn entry(&self, code: &str, index: usize) -> Option<&WordEntry> {
        self.language(code).and_then(|l| l.entries.get(index))
    }

    /// First loaded language other than `code`.
    pub fn first_other_language(&self, code: &str) -> Option<&str> {
        self.languages().find(|c| *c != code)
    }
}

/// Build an aligned dataset from raw word lists.
///
/// Languages with an empty raw list are dropped. Retained languages keep
/// the order of `raw_by_language`. An empty concept list leaves nothing to
/// drill and is reported as [`DrillError::NoUsableLanguageData`].
pub fn normalize<I>(
    concepts: Vec<Concept>,
    raw_by_language: I,
    fallback: &FallbackLexicon,
) -> Result<Dataset, DrillError>
where
    I: IntoIterator<Item = (String, Vec<RawWordRecord>)>,
{
    let n = concepts.len();
    if n == 0 {
        return Err(DrillError::NoUsableLanguageData);
    }
    let mut languages: Vec<LanguageDataset> = Vec::new();

    for (code, records) in raw_by_language {
        if records.is_empty() {
            tracing::debug!("dropping '{code}': empty word list");
            continue;
        }
        if languages.iter().any(|l| l.code == code) {
            tracing::warn!("duplicate word list for '{code}', keeping the first");
            continue;
        }

        let loaded = records.len();
        let mut entries: Vec<WordEntry> = records
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(index, record)| record.resolve(&code, index))
            .collect();

        if entries.len() < n {
            let padding = fallback
                .get(&code)
                .filter(|padding| !padding.is_empty())
                .ok_or_else(|| DrillError::NoFallbackAvailable {
                    language: code.clone(),
                })?;
            tracing::info!("padding '{code}' from {} to {n} entries", entries.len());
            pad_cyclic(&mut entries, padding, n);
        } else if loaded > n {
            tracing::debug!("'{code}' has {loaded} entries for {n} concepts, ignoring the rest");
        }

        languages.push(LanguageDataset::new(code, entries));
    }

    if languages.is_empty() {
        return Err(DrillError::NoUsableLanguageData);
    }

    Ok(Dataset::from_aligned(concepts, languages))
}

/// Append `padding[len % padding.len()]` until `entries` holds `target` items.
/// `padding` must not be empty.
fn pad_cyclic(entries: &mut Vec<WordEntry>, padding: &[WordEntry], target: usize) {
    while entries.len() < target {
        let next = padding[entries.len() % padding.len()].clone();
        entries.push(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::{embedded_concepts, FallbackLexicon};
    use crate::model::PartOfSpeech;

    fn records(words: &[&str]) -> Vec<RawWordRecord> {
        words.iter().map(|w| RawWordRecord::new(*w, "")).collect()
    }

    fn concepts(n: usize) -> Vec<Concept> {
        (0..n)
            .map(|i| Concept::new(i, PartOfSpeech::Noun, "🏠"))
            .collect()
    }

    #[test]
    fn every_language_matches_concept_count() {
        let dataset = normalize(
            embedded_concepts(),
            vec![
                ("en".to_string(), records(&["room", "house"])),
                ("es".to_string(), records(&["habitación"; 12])),
            ],
            &FallbackLexicon::embedded(),
        )
        .unwrap();

        for code in ["en", "es"] {
            assert_eq!(dataset.language(code).unwrap().len(), dataset.concepts().len());
        }
    }

    #[test]
    fn pads_cyclically_from_current_length() {
        let mut lexicon = FallbackLexicon::new();
        lexicon.register(
            "en",
            vec![WordEntry::new("a", ""), WordEntry::new("b", ""), WordEntry::new("c", "")],
        );
        let dataset = normalize(
            concepts(7),
            vec![("en".to_string(), records(&["x", "y", "z", "w"]))],
            &lexicon,
        )
        .unwrap();

        let words: Vec<&str> = dataset
            .language("en")
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.surface_form.as_str())
            .collect();
        // len 4 → index 4 % 3 = 1 → "b", then "c", then "a"
        assert_eq!(words, vec!["x", "y", "z", "w", "b", "c", "a"]);
    }

    #[test]
    fn padding_short_by_three_is_reproducible() {
        let lexicon = FallbackLexicon::embedded();
        let dataset = normalize(
            embedded_concepts(),
            vec![("es".to_string(), records(&["a", "b", "c", "d", "e", "f"]))],
            &lexicon,
        )
        .unwrap();
        let es = dataset.language("es").unwrap();
        let fallback = lexicon.get("es").unwrap();
        assert_eq!(es.entries()[6..], fallback[6..9]);

        let again = normalize(
            embedded_concepts(),
            vec![("es".to_string(), records(&["a", "b", "c", "d", "e", "f"]))],
            &lexicon,
        )
        .unwrap();
        assert_eq!(dataset, again);
    }

    #[test]
    fn empty_lists_are_dropped() {
        let dataset = normalize(
            concepts(2),
            vec![
                ("en".to_string(), records(&["room", "house"])),
                ("fr".to_string(), vec![]),
            ],
            &FallbackLexicon::new(),
        )
        .unwrap();
        assert_eq!(dataset.languages().collect::<Vec<_>>(), vec!["en"]);
    }

    #[test]
    fn no_usable_language_data() {
        let err = normalize(
            concepts(2),
            vec![("en".to_string(), vec![])],
            &FallbackLexicon::embedded(),
        )
        .unwrap_err();
        assert_eq!(err, DrillError::NoUsableLanguageData);
    }

    #[test]
    fn empty_concept_list_is_unusable() {
        let err = normalize(
            vec![],
            vec![("en".to_string(), records(&["room"]))],
            &FallbackLexicon::embedded(),
        )
        .unwrap_err();
        assert_eq!(err, DrillError::NoUsableLanguageData);
    }

    #[test]
    fn no_fallback_for_short_language() {
        let err = normalize(
            concepts(3),
            vec![("sw".to_string(), records(&["chumba"]))],
            &FallbackLexicon::embedded(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DrillError::NoFallbackAvailable {
                language: "sw".into()
            }
        );
    }

    #[test]
    fn empty_padding_list_is_no_fallback() {
        let mut lexicon = FallbackLexicon::new();
        lexicon.register("sw", vec![]);
        let err = normalize(
            concepts(2),
            vec![("sw".to_string(), records(&["chumba"]))],
            &lexicon,
        )
        .unwrap_err();
        assert!(matches!(err, DrillError::NoFallbackAvailable { .. }));
    }

    #[test]
    fn full_length_language_needs_no_fallback() {
        let dataset = normalize(
            concepts(1),
            vec![("sw".to_string(), records(&["chumba"]))],
            &FallbackLexicon::new(),
        )
        .unwrap();
        assert_eq!(dataset.entry("sw", 0).unwrap().surface_form, "chumba");
    }

    #[test]
    fn missing_words_become_placeholders() {
        let dataset = normalize(
            concepts(2),
            vec![(
                "en".to_string(),
                vec![RawWordRecord::default(), RawWordRecord::new("house", "")],
            )],
            &FallbackLexicon::new(),
        )
        .unwrap();
        assert_eq!(dataset.entry("en", 0).unwrap().surface_form, "?en#0");
    }

    #[test]
    fn load_order_is_kept() {
        let dataset = normalize(
            concepts(1),
            vec![
                ("es".to_string(), records(&["casa"])),
                ("en".to_string(), records(&["house"])),
                ("es".to_string(), records(&["hogar"])),
            ],
            &FallbackLexicon::new(),
        )
        .unwrap();
        assert_eq!(dataset.languages().collect::<Vec<_>>(), vec!["es", "en"]);
        assert_eq!(dataset.entry("es", 0).unwrap().surface_form, "casa");
        assert_eq!(dataset.first_other_language("es"), Some("en"));
    }
}
