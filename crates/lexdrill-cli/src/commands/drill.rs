//! The `lexdrill drill` command.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use lexdrill_core::error::DrillError;
use lexdrill_core::model::InteractionMode;
use lexdrill_core::session::{DrillSession, Intent, SessionConfig, Transition};
use lexdrill_core::traits::DrillDisplay;

use crate::commands::source;
use crate::display::ConsoleDisplay;
use crate::input::{parse_line, Command, HELP};
use crate::SourceArgs;

pub struct DrillArgs {
    pub source: SourceArgs,
    pub target: Option<String>,
    pub reference: Option<String>,
    pub mode: Option<String>,
    pub seed: Option<u64>,
    pub hold_ms: Option<u64>,
}

pub async fn execute(args: DrillArgs) -> Result<()> {
    let config = source::resolve_config(&args.source)?;

    let mode = match &args.mode {
        Some(mode) => mode
            .parse::<InteractionMode>()
            .map_err(anyhow::Error::msg)?,
        None => config.default_mode,
    };
    let hold = args
        .hold_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.hold());

    let outcome = source::load(&config).await?;
    let mut display = ConsoleDisplay::new(std::io::stdout());
    if let Some(notice) = &outcome.notice {
        display.notice(notice);
    }

    let mut session = DrillSession::new(
        Arc::new(outcome.dataset),
        SessionConfig {
            target_language: args.target.or(config.target_language),
            reference_language: args.reference.or(config.reference_language),
            mode,
            hold,
            seed: args.seed,
        },
    )
    .context("cannot start the drill")?;

    display.line(HELP);
    display.render(&session.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = session.pending_deadline();
        let sleep_target = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => display.line(HELP),
                    Ok(Command::Stats) => display.summary(&session.summary()),
                    Ok(Command::Intent(intent)) => {
                        handle_intent(&mut session, &mut display, intent);
                    }
                    Err(message) => display.line(&message),
                }
            }
            _ = tokio::time::sleep_until(sleep_target), if deadline.is_some() => {
                if session.tick(Instant::now()) {
                    display.render(&session.view());
                }
            }
        }
    }

    let summary = session.summary();
    tracing::debug!(
        session = %session.state().id,
        turns = summary.turns_started,
        "drill finished"
    );
    display.summary(&summary);
    Ok(())
}

fn handle_intent<W: Write>(
    session: &mut DrillSession,
    display: &mut ConsoleDisplay<W>,
    intent: Intent,
) {
    let hint = match &intent {
        Intent::ToggleConjugation => "This word has no conjugations to drill.",
        _ => "Press Enter for the next word.",
    };
    let target = match &intent {
        Intent::SetLanguages { target, .. } => Some(target.clone()),
        _ => None,
    };

    match session.apply(intent) {
        Ok(Transition::Ignored) => display.line(hint),
        Ok(Transition::LanguagesCorrected { .. }) => {
            display.notice(&DrillError::SameLanguageSelected {
                language: target.unwrap_or_default(),
            });
            display.render(&session.view());
        }
        Ok(Transition::ConjugationRefused(e)) => display.notice(&e),
        Ok(Transition::TurnStarted | Transition::Answered(_)) => display.render(&session.view()),
        Err(e) => display.notice(&e),
    }
}
