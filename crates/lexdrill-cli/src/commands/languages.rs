//! The `lexdrill languages` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use lexdrill_core::fallback::FallbackLexicon;
use lexdrill_core::languages::display_name;

use crate::commands::source;
use crate::SourceArgs;

pub async fn execute(args: SourceArgs) -> Result<()> {
    let config = source::resolve_config(&args)?;
    let outcome = source::load(&config).await?;
    if let Some(notice) = &outcome.notice {
        eprintln!("Notice: {notice}");
    }

    let padding = FallbackLexicon::embedded();
    let mut table = Table::new();
    table.set_header(vec!["Code", "Language", "Entries", "Padding list"]);
    for code in outcome.dataset.languages() {
        let entries = outcome
            .dataset
            .language(code)
            .map(|l| l.len())
            .unwrap_or_default();
        let has_padding = if padding.get(code).is_some() { "yes" } else { "no" };
        table.add_row(vec![
            Cell::new(code),
            Cell::new(display_name(code)),
            Cell::new(entries),
            Cell::new(has_padding),
        ]);
    }

    println!("{table}");
    println!(
        "{} concepts{}",
        outcome.dataset.concepts().len(),
        if outcome.used_fallback {
            " (built-in vocabulary)"
        } else {
            ""
        }
    );
    Ok(())
}
