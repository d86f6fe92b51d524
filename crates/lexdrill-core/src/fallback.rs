//! Embedded fallback data.
//!
//! A small household vocabulary in four languages. It pads short word lists
//! and replaces the whole dataset when retrieval fails.

use crate::dataset::{Dataset, LanguageDataset};
use crate::model::{Concept, PartOfSpeech, WordEntry};

const CONCEPT_ICONS: [&str; 9] = ["🚪", "🏠", "🏡", "🏢", "🍳", "🛋️", "🛏️", "🚿", "🚽"];

const EN: [(&str, &str); 9] = [
    ("room", "/ruːm/"),
    ("house", "/haʊs/"),
    ("home", "/hoʊm/"),
    ("apartment", "/əˈpɑːrt.mənt/"),
    ("kitchen", "/ˈkɪtʃ.ɪn/"),
    ("living room", "/ˈlɪv.ɪŋ ˌruːm/"),
    ("bedroom", "/ˈbed.ruːm/"),
    ("bathroom", "/ˈbæθ.ruːm/"),
    ("toilet", "/ˈtɔɪ.lət/"),
];

const ES: [(&str, &str); 9] = [
    ("habitación", "/a.βi.taˈθjon/"),
    ("casa", "/ˈka.sa/"),
    ("hogar", "/oˈɡaɾ/"),
    ("apartamento", "/a.paɾ.taˈmen.to/"),
    ("cocina", "/koˈθi.na/"),
    ("sala de estar", "/ˈsa.la ðe esˈtaɾ/"),
    ("dormitorio", "/doɾ.miˈto.ɾjo/"),
    ("baño", "/ˈba.ɲo/"),
    ("inodoro", "/i.noˈðo.ɾo/"),
];

const FR: [(&str, &str); 9] = [
    ("chambre", "/ʃɑ̃bʁ/"),
    ("maison", "/mɛ.zɔ̃/"),
    ("maison", "/mɛ.zɔ̃/"),
    ("appartement", "/a.paʁ.tə.mɑ̃/"),
    ("cuisine", "/kɥi.zin/"),
    ("salon", "/sa.lɔ̃/"),
    ("chambre", "/ʃɑ̃bʁ/"),
    ("salle de bain", "/sal də bɛ̃/"),
    ("toilettes", "/twa.lɛt/"),
];

const DE: [(&str, &str); 9] = [
    ("Zimmer", "/ˈtsɪmɐ/"),
    ("Haus", "/haʊ̯s/"),
    ("Zuhause", "/tsuˈhaʊ̯zə/"),
    ("Wohnung", "/ˈvoːnʊŋ/"),
    ("Küche", "/ˈkʏçə/"),
    ("Wohnzimmer", "/ˈvoːnˌtsɪmɐ/"),
    ("Schlafzimmer", "/ˈʃlaːfˌtsɪmɐ/"),
    ("Badezimmer", "/ˈbaːdəˌtsɪmɐ/"),
    ("Toilette", "/to̯aˈlɛtə/"),
];

/// Per-language word lists used to pad short lists.
#[derive(Debug, Clone, Default)]
pub struct FallbackLexicon {
    lists: Vec<(String, Vec<WordEntry>)>,
}

impl FallbackLexicon {
    /// An empty lexicon; padding any language fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in lexicon (`en`, `es`, `fr`, `de`).
    pub fn embedded() -> Self {
        let mut lexicon = Self::new();
        for (code, words) in [("en", &EN), ("es", &ES), ("fr", &FR), ("de", &DE)] {
            lexicon.register(
                code,
                words.iter().map(|(w, p)| WordEntry::new(*w, *p)).collect(),
            );
        }
        lexicon
    }

    /// Register (or replace) the list for `code`. Empty lists are ignored.
    pub fn register(&mut self, code: &str, words: Vec<WordEntry>) {
        if words.is_empty() {
            return;
        }
        match self.lists.iter_mut().find(|(c, _)| c == code) {
            Some((_, existing)) => *existing = words,
            None => self.lists.push((code.to_string(), words)),
        }
    }

    /// The fallback list for `code`, if registered.
    pub fn get(&self, code: &str) -> Option<&[WordEntry]> {
        self.lists
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, words)| words.as_slice())
    }

    /// Registered language codes, in registration order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.lists.iter().map(|(c, _)| c.as_str())
    }
}

/// The built-in concept list.
pub fn embedded_concepts() -> Vec<Concept> {
    CONCEPT_ICONS
        .iter()
        .enumerate()
        .map(|(index, icon)| Concept::new(index, PartOfSpeech::Noun, *icon))
        .collect()
}

/// The complete built-in dataset, used when nothing could be loaded.
pub fn embedded_dataset() -> Dataset {
    let languages = FallbackLexicon::embedded()
        .lists
        .into_iter()
        .map(|(code, entries)| LanguageDataset::new(code, entries))
        .collect();
    Dataset::from_aligned(embedded_concepts(), languages)
}
