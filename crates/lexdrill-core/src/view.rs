//! View-model pushed to the display after every intent.

use serde::{Deserialize, Serialize};

use crate::model::InteractionMode;
use crate::statistics::Score;

/// Whether the answer of the current turn is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerPhase {
    /// The user may guess, reveal, or skip.
    Hidden,
    /// The answer is shown; the user may only advance.
    Revealed,
}

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feedback {
    Correct,
    Incorrect,
    Revealed,
    CountedCorrect,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Correct => "Correct!",
            Feedback::Incorrect => "Incorrect.",
            Feedback::Revealed => "Answer revealed.",
            Feedback::CountedCorrect => "Counted as correct!",
        }
    }

    /// Whether the turn earned credit.
    pub fn is_credited(&self) -> bool {
        matches!(self, Feedback::Correct | Feedback::CountedCorrect)
    }
}

/// Tense and person labels of a conjugation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugationTags {
    pub tense: String,
    pub person: String,
}

/// Everything the display needs to render one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    pub shown_word: String,
    pub shown_pronunciation: String,
    pub icon: String,
    pub part_of_speech: String,
    pub conjugation: Option<ConjugationTags>,
    pub phase: AnswerPhase,
    /// Only set once the answer is revealed.
    pub revealed_answer: Option<String>,
    pub revealed_pronunciation: Option<String>,
    pub feedback: Option<Feedback>,
    pub score: Score,
    pub accuracy: u8,
    /// The current concept is a verb with forms in the target language.
    pub conjugation_available: bool,
    pub conjugating: bool,
    pub target_language: String,
    pub reference_language: String,
    pub mode: InteractionMode,
}

impl TurnView {
    pub fn mode_indicator(&self) -> &'static str {
        self.mode.indicator()
    }
}
