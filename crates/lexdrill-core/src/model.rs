//! Core data model types for lexdrill.
//!
//! These are the canonical, already-normalized shapes that everything
//! downstream of the document decoder works with: concepts, word entries,
//! and the small enums that describe a drill session.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Conjugation table of a verb: tense key → (person key → surface form).
///
/// Person maps may carry the wildcard key `"*"` holding a generic form.
pub type ConjugationTable = BTreeMap<String, BTreeMap<String, String>>;

/// A language-independent semantic unit drilled in the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Stable ordinal; equals the concept's position in the concept list.
    pub index: usize,
    /// Grammatical category.
    pub part_of_speech: PartOfSpeech,
    /// Pictorial glyph shown alongside the word.
    pub icon: String,
}

impl Concept {
    pub fn new(index: usize, part_of_speech: PartOfSpeech, icon: impl Into<String>) -> Self {
        Self {
            index,
            part_of_speech,
            icon: icon.into(),
        }
    }
}

/// A language's realization of a concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Citation form. Never empty after decoding.
    pub surface_form: String,
    /// Pronunciation hint (IPA or romanization); may be empty.
    #[serde(default)]
    pub pronunciation: String,
    /// Inflected forms for verbs.
    #[serde(default)]
    pub forms: Option<ConjugationTable>,
}

impl WordEntry {
    pub fn new(surface_form: impl Into<String>, pronunciation: impl Into<String>) -> Self {
        Self {
            surface_form: surface_form.into(),
            pronunciation: pronunciation.into(),
            forms: None,
        }
    }

    /// Attach a conjugation table.
    pub fn with_forms(mut self, forms: ConjugationTable) -> Self {
        self.forms = Some(forms);
        self
    }

    /// Entry used when a lookup misses, so comparison code always has a word.
    pub fn placeholder(language: &str, index: usize) -> Self {
        Self::new(placeholder_word(language, index), "")
    }
}

/// Placeholder token standing in for a missing surface form.
pub fn placeholder_word(language: &str, index: usize) -> String {
    format!("?{language}#{index}")
}

/// Grammatical category of a concept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartOfSpeech::Noun => write!(f, "noun"),
            PartOfSpeech::Verb => write!(f, "verb"),
            PartOfSpeech::Adjective => write!(f, "adjective"),
            PartOfSpeech::Adverb => write!(f, "adverb"),
            PartOfSpeech::Other(other) => write!(f, "{other}"),
        }
    }
}

impl FromStr for PartOfSpeech {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Ok(match lowered.as_str() {
            "" | "noun" => PartOfSpeech::Noun,
            "verb" => PartOfSpeech::Verb,
            "adjective" | "adj" => PartOfSpeech::Adjective,
            "adverb" | "adv" => PartOfSpeech::Adverb,
            _ => PartOfSpeech::Other(lowered),
        })
    }
}

/// How the shown/expected sides of a turn are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionMode {
    #[default]
    TargetToReference,
    ReferenceToTarget,
    Random,
}

impl InteractionMode {
    /// Short description of what the user sees and answers.
    pub fn indicator(&self) -> &'static str {
        match self {
            InteractionMode::TargetToReference => "Shown: Target, Answer: Reference",
            InteractionMode::ReferenceToTarget => "Shown: Reference, Answer: Target",
            InteractionMode::Random => "Randomly alternating direction",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionMode::TargetToReference => write!(f, "target-to-reference"),
            InteractionMode::ReferenceToTarget => write!(f, "reference-to-target"),
            InteractionMode::Random => write!(f, "random"),
        }
    }
}

impl FromStr for InteractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "target-to-reference" | "t2r" | "forward" => Ok(InteractionMode::TargetToReference),
            "reference-to-target" | "r2t" | "reverse" => Ok(InteractionMode::ReferenceToTarget),
            "random" => Ok(InteractionMode::Random),
            other => Err(format!("unknown interaction mode: {other}")),
        }
    }
}

/// Resolved direction of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    TargetToReference,
    ReferenceToTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_of_speech_display_and_parse() {
        assert_eq!(PartOfSpeech::Verb.to_string(), "verb");
        assert_eq!("Verb".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Verb);
        assert_eq!("".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Noun);
        assert_eq!(
            "Particle".parse::<PartOfSpeech>().unwrap(),
            PartOfSpeech::Other("particle".into())
        );
    }

    #[test]
    fn part_of_speech_serde_keeps_unknown_values() {
        let pos: PartOfSpeech = serde_json::from_str("\"verb\"").unwrap();
        assert_eq!(pos, PartOfSpeech::Verb);
        let pos: PartOfSpeech = serde_json::from_str("\"pronoun\"").unwrap();
        assert_eq!(pos, PartOfSpeech::Other("pronoun".into()));
    }

    #[test]
    fn interaction_mode_display_and_parse() {
        for mode in [
            InteractionMode::TargetToReference,
            InteractionMode::ReferenceToTarget,
            InteractionMode::Random,
        ] {
            assert_eq!(mode.to_string().parse::<InteractionMode>().unwrap(), mode);
        }
        assert!("sideways".parse::<InteractionMode>().is_err());
    }

    #[test]
    fn placeholder_is_never_empty() {
        let entry = WordEntry::placeholder("es", 4);
        assert_eq!(entry.surface_form, "?es#4");
        assert!(entry.pronunciation.is_empty());
        assert!(entry.forms.is_none());
    }
}
