//! The `lexdrill init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("lexdrill.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("vocab/data/concept.json"), DEMO_CONCEPTS)?;
    write_if_missing(Path::new("vocab/languages/en.json"), DEMO_EN)?;
    write_if_missing(Path::new("vocab/languages/es.json"), DEMO_ES)?;

    println!("\nNext steps:");
    println!("  1. Add word lists under vocab/languages/<code>.json");
    println!("  2. Run: lexdrill validate --data-dir vocab");
    println!("  3. Run: lexdrill drill --target es --reference en");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lexdrill configuration

default_mode = "target-to-reference"
target_language = "es"
reference_language = "en"

# Milliseconds allowed for each document.
concept_timeout_ms = 3000
language_timeout_ms = 2000

# How long "Counted as correct!" stays before the next word.
answer_display_ms = 1500

# Only probe these languages (default: every known code).
languages = ["en", "es"]

embedded_fallback = true

[source]
type = "directory"
path = "vocab"

# [source]
# type = "http"
# base_url = "${LEXDRILL_BASE_URL}"
"#;

const DEMO_CONCEPTS: &str = r#"[
  {"type": "noun", "emoji": "🏠"},
  {"type": "noun", "emoji": "🍳"},
  {"type": "verb", "emoji": "🗣️"},
  {"type": "verb", "emoji": "🍽️"}
]
"#;

const DEMO_EN: &str = r#"[
  {"word": "house", "phonetic": "/haʊs/"},
  {"word": "kitchen", "phonetic": "/ˈkɪtʃ.ən/"},
  {"word": "to speak", "phonetic": "/spiːk/", "forms": {
    "present": {"*": "speak", "3sg": "speaks"},
    "past": {"*": "spoke"}
  }},
  {"word": "to eat", "phonetic": "/iːt/", "forms": {
    "present": {"*": "eat", "3sg": "eats"},
    "past": {"*": "ate"}
  }}
]
"#;

const DEMO_ES: &str = r#"[
  {"word": "casa", "phonetic": "/ˈka.sa/"},
  {"word": "cocina", "phonetic": "/koˈθi.na/"},
  {"word": "hablar", "phonetic": "/aˈβlar/", "forms": {
    "present": {"1sg": "hablo", "2sg": "hablas", "3sg": "habla", "1pl": "hablamos", "2pl": "habláis", "3pl": "hablan"},
    "past": {"1sg": "hablé", "2sg": "hablaste", "3sg": "habló", "1pl": "hablamos", "2pl": "hablasteis", "3pl": "hablaron"}
  }},
  {"word": "comer", "phonetic": "/koˈmer/", "forms": {
    "present": {"1sg": "como", "2sg": "comes", "3sg": "come", "1pl": "comemos", "2pl": "coméis", "3pl": "comen"},
    "past": {"1sg": "comí", "2sg": "comiste", "3sg": "comió", "1pl": "comimos", "2pl": "comisteis", "3pl": "comieron"}
  }}
]
"#;
