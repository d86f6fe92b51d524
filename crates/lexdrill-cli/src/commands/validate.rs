//! The `lexdrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lexdrill_core::languages::display_name;
use lexdrill_core::parser::{load_data_directory, validate_data_directory};

pub fn execute(data_dir: PathBuf) -> Result<()> {
    let dir = load_data_directory(&data_dir)?;

    println!(
        "Data directory: {} ({} concepts, {} languages)",
        data_dir.display(),
        dir.concepts.len(),
        dir.languages.len()
    );
    for (code, words) in &dir.languages {
        println!("  {code} ({}): {} entries", display_name(code), words.len());
    }

    let warnings = validate_data_directory(&dir);
    for w in &warnings {
        let prefix = match (&w.language, w.index) {
            (Some(code), Some(index)) => format!("  [{code}#{index}]"),
            (Some(code), None) => format!("  [{code}]"),
            _ => "  ".to_string(),
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All word lists valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
