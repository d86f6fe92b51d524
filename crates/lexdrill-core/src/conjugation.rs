//! Verb conjugation lookup.
//!
//! Resolution order for a (tense, person) pair:
//!
//! 1. `forms[tense][person]`
//! 2. `forms[tense]["*"]`, the generic form for the tense
//! 3. the verb's citation form
//!
//! Only a missing table, or a missing tense, is an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::model::WordEntry;

/// Person key that holds the generic form of a tense.
pub const WILDCARD_PERSON: &str = "*";

/// Tenses drilled in conjugation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Present,
    Past,
}

impl Tense {
    pub const ALL: [Tense; 2] = [Tense::Present, Tense::Past];

    /// Key used in conjugation tables.
    pub fn key(&self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::Past => "past",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" => Ok(Tense::Present),
            "past" => Ok(Tense::Past),
            other => Err(format!("unknown tense: {other}")),
        }
    }
}

/// Grammatical person and number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    #[serde(rename = "1sg")]
    FirstSingular,
    #[serde(rename = "2sg")]
    SecondSingular,
    #[serde(rename = "3sg")]
    ThirdSingular,
    #[serde(rename = "1pl")]
    FirstPlural,
    #[serde(rename = "2pl")]
    SecondPlural,
    #[serde(rename = "3pl")]
    ThirdPlural,
}

impl Person {
    pub const ALL: [Person; 6] = [
        Person::FirstSingular,
        Person::SecondSingular,
        Person::ThirdSingular,
        Person::FirstPlural,
        Person::SecondPlural,
        Person::ThirdPlural,
    ];

    /// Key used in conjugation tables.
    pub fn key(&self) -> &'static str {
        match self {
            Person::FirstSingular => "1sg",
            Person::SecondSingular => "2sg",
            Person::ThirdSingular => "3sg",
            Person::FirstPlural => "1pl",
            Person::SecondPlural => "2pl",
            Person::ThirdPlural => "3pl",
        }
    }

    /// Human-readable label shown next to the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Person::FirstSingular => "1st sing. (I)",
            Person::SecondSingular => "2nd sing. (YOU)",
            Person::ThirdSingular => "3rd sing. (HE/SHE/IT)",
            Person::FirstPlural => "1st plur. (WE)",
            Person::SecondPlural => "2nd plur. (YOU)",
            Person::ThirdPlural => "3rd plur. (THEY)",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Person {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Person::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| format!("unknown person: {key}"))
    }
}

/// Whether `verb` has a table for every drilled tense, so that every
/// sampled prompt resolves.
pub fn is_conjugable(verb: &WordEntry) -> bool {
    verb.forms
        .as_ref()
        .is_some_and(|table| Tense::ALL.iter().all(|t| table.contains_key(t.key())))
}

/// Resolve the expected form of `verb` for `tense` and `person`.
pub fn resolve(verb: &WordEntry, tense: Tense, person: Person) -> Result<String, DrillError> {
    resolve_key(verb, tense.key(), person.key())
}

/// Resolve by raw table keys; `person` may be the wildcard itself.
pub fn resolve_key(verb: &WordEntry, tense: &str, person: &str) -> Result<String, DrillError> {
    let malformed = || DrillError::MalformedVerbEntry {
        word: verb.surface_form.clone(),
        tense: tense.to_string(),
    };
    let persons = verb
        .forms
        .as_ref()
        .ok_or_else(malformed)?
        .get(tense)
        .ok_or_else(malformed)?;

    let specific = if person == WILDCARD_PERSON {
        None
    } else {
        persons.get(person)
    };

    let usable = |form: &&String| !form.trim().is_empty();
    Ok(specific
        .filter(usable)
        .or_else(|| persons.get(WILDCARD_PERSON).filter(usable))
        .unwrap_or(&verb.surface_form)
        .clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConjugationTable;
    use std::collections::BTreeMap;

    fn table(entries: &[(&str, &[(&str, &str)])]) -> ConjugationTable {
        entries
            .iter()
            .map(|(tense, persons)| {
                let forms: BTreeMap<String, String> = persons
                    .iter()
                    .map(|(p, f)| (p.to_string(), f.to_string()))
                    .collect();
                (tense.to_string(), forms)
            })
            .collect()
    }

    fn go() -> WordEntry {
        WordEntry::new("go", "/ɡoʊ/").with_forms(table(&[
            ("present", &[("*", "go"), ("3sg", "goes")]),
            ("past", &[("*", "went")]),
        ]))
    }

    #[test]
    fn specific_person_wins() {
        assert_eq!(resolve(&go(), Tense::Present, Person::ThirdSingular).unwrap(), "goes");
    }

    #[test]
    fn wildcard_fallback() {
        assert_eq!(resolve(&go(), Tense::Present, Person::FirstSingular).unwrap(), "go");
        assert_eq!(resolve(&go(), Tense::Past, Person::ThirdPlural).unwrap(), "went");
    }

    #[test]
    fn wildcard_person_key_reads_generic_form() {
        assert_eq!(resolve_key(&go(), "present", "*").unwrap(), "go");
    }

    #[test]
    fn citation_form_fallback() {
        let verb = WordEntry::new("ser", "").with_forms(table(&[("present", &[("1sg", "soy")])]));
        assert_eq!(resolve(&verb, Tense::Present, Person::FirstSingular).unwrap(), "soy");
        assert_eq!(resolve(&verb, Tense::Present, Person::SecondPlural).unwrap(), "ser");
    }

    #[test]
    fn blank_person_form_uses_wildcard() {
        let verb = WordEntry::new("ir", "")
            .with_forms(table(&[("past", &[("1sg", " "), ("*", "fue")])]));
        assert_eq!(resolve(&verb, Tense::Past, Person::FirstSingular).unwrap(), "fue");
    }

    #[test]
    fn missing_tense_is_malformed() {
        let verb = WordEntry::new("ser", "").with_forms(table(&[("present", &[("*", "es")])]));
        let err = resolve(&verb, Tense::Past, Person::FirstSingular).unwrap_err();
        assert_eq!(
            err,
            DrillError::MalformedVerbEntry {
                word: "ser".into(),
                tense: "past".into()
            }
        );
    }

    #[test]
    fn missing_table_is_malformed() {
        let noun = WordEntry::new("casa", "");
        assert!(matches!(
            resolve(&noun, Tense::Present, Person::FirstPlural),
            Err(DrillError::MalformedVerbEntry { .. })
        ));
    }

    #[test]
    fn person_parse_and_labels() {
        assert_eq!("2PL".parse::<Person>().unwrap(), Person::SecondPlural);
        assert!("4sg".parse::<Person>().is_err());
        assert_eq!(Person::ThirdSingular.label(), "3rd sing. (HE/SHE/IT)");
        assert_eq!("Past".parse::<Tense>().unwrap(), Tense::Past);
    }

    #[test]
    fn conjugable_needs_every_tense() {
        assert!(is_conjugable(&go()));
        let present_only =
            WordEntry::new("go", "").with_forms(table(&[("present", &[("*", "go")])]));
        assert!(!is_conjugable(&present_only));
        assert!(!is_conjugable(&WordEntry::new("ir", "").with_forms(ConjugationTable::new())));
        assert!(!is_conjugable(&WordEntry::new("ir", "")));
    }
}
