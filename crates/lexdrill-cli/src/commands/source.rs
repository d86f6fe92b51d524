//! Shared source selection for commands that load a dataset.

use anyhow::Result;

use lexdrill_core::fallback::FallbackLexicon;
use lexdrill_core::loader::{load_dataset, LoadOutcome};
use lexdrill_sources::config::{create_source, load_config_from, LexdrillConfig, SourceConfig};

use crate::SourceArgs;

/// Load the config file and apply command-line source overrides.
pub fn resolve_config(args: &SourceArgs) -> Result<LexdrillConfig> {
    let mut config = load_config_from(args.config.as_deref())?;
    if args.offline {
        config.source = SourceConfig::Embedded;
    } else if let Some(url) = &args.url {
        config.source = SourceConfig::Http {
            base_url: url.clone(),
        };
    } else if let Some(dir) = &args.data_dir {
        config.source = SourceConfig::Directory { path: dir.clone() };
    }
    Ok(config)
}

/// Retrieve the dataset described by `config`.
///
/// Fatal load errors become command errors; recoverable ones stay in the
/// outcome's notice.
pub async fn load(config: &LexdrillConfig) -> Result<LoadOutcome> {
    let source = create_source(&config.source)?;
    tracing::debug!("loading vocabulary from {} source", source.name());
    let outcome = load_dataset(source, &config.load_options(), &FallbackLexicon::embedded()).await?;
    Ok(outcome)
}
