//! Line commands of the interactive drill.

use lexdrill_core::model::InteractionMode;
use lexdrill_core::session::Intent;

pub const HELP: &str = "\
Type your answer and press Enter.
  <Enter>               skip (counted as correct) / next word
  :reveal               show the answer
  :conj                 drill the conjugations of the current verb
  :mode <mode>          target-to-reference, reference-to-target or random
  :lang <target> <ref>  switch languages (e.g. :lang es en)
  :stats                show the score so far
  :help                 show this help
  :quit                 end the drill";

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Stats,
    Help,
    Quit,
}

/// Parse one input line. Plain text is a guess; an empty line advances.
pub fn parse_line(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(if line.is_empty() {
            Command::Intent(Intent::Advance)
        } else {
            Command::Intent(Intent::SubmitGuess(line.to_string()))
        });
    };

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    match (name.as_str(), args.as_slice()) {
        ("reveal" | "r", []) => Ok(Command::Intent(Intent::RevealAnswer)),
        ("conj" | "c", []) => Ok(Command::Intent(Intent::ToggleConjugation)),
        ("mode" | "m", [mode]) => mode
            .parse::<InteractionMode>()
            .map(|m| Command::Intent(Intent::SetInteractionMode(m))),
        ("lang" | "l", [target, reference]) => Ok(Command::Intent(Intent::SetLanguages {
            target: target.to_lowercase(),
            reference: reference.to_lowercase(),
        })),
        ("stats" | "s", []) => Ok(Command::Stats),
        ("help" | "h" | "?", []) => Ok(Command::Help),
        ("quit" | "q" | "exit", []) => Ok(Command::Quit),
        ("mode" | "m", _) => Err("usage: :mode <target-to-reference|reference-to-target|random>".into()),
        ("lang" | "l", _) => Err("usage: :lang <target> <reference>".into()),
        _ => Err(format!("unknown command ':{name}', type :help")),
    }
}
