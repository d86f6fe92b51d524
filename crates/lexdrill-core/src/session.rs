//! Quiz session engine.
//!
//! Owns the single [`SessionState`] of a drill run and drives it in response
//! to [`Intent`]s. Every handler either applies its whole transition or
//! leaves the state untouched.
//!
//! Turn lifecycle:
//!
//! ```text
//!            submit / reveal / advance
//!   Hidden ─────────────────────────────▶ Revealed
//!     ▲                                      │
//!     └──────── advance / timer / ───────────┘
//!               language, mode, conjugation change
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::conjugation::{self, Person, Tense};
use crate::dataset::Dataset;
use crate::error::DrillError;
use crate::model::{Direction, InteractionMode, PartOfSpeech, WordEntry};
use crate::statistics::{Score, SessionSummary, Tally};
use crate::timer::{TransitionTimer, DEFAULT_HOLD};
use crate::view::{AnswerPhase, ConjugationTags, Feedback, TurnView};

/// Icon shown while drilling conjugations.
pub const CONJUGATION_ICON: &str = "🔤";
/// Part-of-speech label shown while drilling conjugations.
pub const CONJUGATION_LABEL: &str = "Verb Conjugation";

/// A user intent raised by the input surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SubmitGuess(String),
    RevealAnswer,
    Advance,
    ToggleConjugation,
    SetLanguages { target: String, reference: String },
    SetInteractionMode(InteractionMode),
}

/// What an intent did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The intent does not apply in the current phase; nothing changed.
    Ignored,
    /// A fresh turn (or conjugation prompt) is showing.
    TurnStarted,
    /// The turn moved to `Revealed`.
    Answered(Feedback),
    /// Same language picked twice; the reference was replaced.
    LanguagesCorrected { reference: String },
    /// The verb cannot be conjugated; nothing changed.
    ConjugationRefused(DrillError),
}

/// Start-up options of a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub target_language: Option<String>,
    pub reference_language: Option<String>,
    pub mode: InteractionMode,
    /// How long the counted-correct feedback stays before the next turn.
    pub hold: Duration,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_language: None,
            reference_language: None,
            mode: InteractionMode::default(),
            hold: DEFAULT_HOLD,
            seed: None,
        }
    }
}

/// Read-only handle on a verb entry owned by the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbRef {
    pub language: String,
    pub index: usize,
}

/// Word shown to the user and the answer expected back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    pub shown_word: String,
    pub shown_pronunciation: String,
    pub expected_answer: String,
    pub answer_pronunciation: String,
}

/// The mutable state of one drill run.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: Uuid,
    pub target_language: String,
    pub reference_language: String,
    pub mode: InteractionMode,
    pub concept_index: usize,
    pub direction: Direction,
    pub is_conjugating: bool,
    pub current_verb: Option<VerbRef>,
    pub tense: Option<Tense>,
    pub person: Option<Person>,
    pub phase: AnswerPhase,
    pub feedback: Option<Feedback>,
    pub prompt: Prompt,
    pub score: Score,
    pub tally: Tally,
    /// Incremented every time a turn or conjugation prompt starts.
    pub generation: u64,
}

/// The quiz session engine.
pub struct DrillSession {
    dataset: Arc<Dataset>,
    state: SessionState,
    timer: TransitionTimer,
    rng: StdRng,
}

impl DrillSession {
    /// Create a session and start its first turn.
    ///
    /// Unloaded language preferences are rejected. Without preferences the
    /// first two loaded languages are used.
    pub fn new(dataset: Arc<Dataset>, config: SessionConfig) -> Result<Self, DrillError> {
        let target = match config.target_language {
            Some(code) if dataset.has_language(&code) => code,
            Some(code) => return Err(DrillError::UnknownLanguage(code)),
            None => dataset
                .languages()
                .next()
                .ok_or(DrillError::NoUsableLanguageData)?
                .to_string(),
        };
        let reference = match config.reference_language {
            Some(code) if !dataset.has_language(&code) => {
                return Err(DrillError::UnknownLanguage(code))
            }
            Some(code) if code != target => code,
            _ => dataset
                .first_other_language(&target)
                .unwrap_or(&target)
                .to_string(),
        };

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let state = SessionState {
            id: Uuid::new_v4(),
            target_language: target,
            reference_language: reference,
            mode: config.mode,
            concept_index: 0,
            direction: Direction::TargetToReference,
            is_conjugating: false,
            current_verb: None,
            tense: None,
            person: None,
            phase: AnswerPhase::Hidden,
            feedback: None,
            prompt: Prompt::default(),
            score: Score::new(),
            tally: Tally::default(),
            generation: 0,
        };

        let mut session = Self {
            dataset,
            state,
            timer: TransitionTimer::new(config.hold),
            rng,
        };
        tracing::debug!(
            session = %session.state.id,
            target = %session.state.target_language,
            reference = %session.state.reference_language,
            "session created"
        );
        session.start_turn();
        Ok(session)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The verb of the current turn, borrowed from the dataset.
    pub fn current_verb(&self) -> Option<&WordEntry> {
        let verb = self.state.current_verb.as_ref()?;
        self.dataset.entry(&verb.language, verb.index)
    }

    /// Deadline of the pending delayed transition, if armed.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Dispatch an intent.
    pub fn apply(&mut self, intent: Intent) -> Result<Transition, DrillError> {
        self.apply_at(intent, Instant::now())
    }

    /// Dispatch an intent at a given instant (used to arm the timer).
    pub fn apply_at(&mut self, intent: Intent, now: Instant) -> Result<Transition, DrillError> {
        match intent {
            Intent::SubmitGuess(text) => Ok(self.submit_guess(&text)),
            Intent::RevealAnswer => Ok(self.reveal_answer()),
            Intent::Advance => Ok(self.advance_at(now)),
            Intent::ToggleConjugation => Ok(self.toggle_conjugation()),
            Intent::SetLanguages { target, reference } => self.set_languages(&target, &reference),
            Intent::SetInteractionMode(mode) => Ok(self.set_interaction_mode(mode)),
        }
    }

    /// Pick a new concept and direction and show it, answer hidden.
    pub fn start_turn(&mut self) {
        let dataset = Arc::clone(&self.dataset);
        let n = dataset.concepts().len();
        let index = if n == 0 {
            0
        } else {
            self.rng.random_range(0..n)
        };
        let direction = match self.state.mode {
            InteractionMode::TargetToReference => Direction::TargetToReference,
            InteractionMode::ReferenceToTarget => Direction::ReferenceToTarget,
            InteractionMode::Random => {
                if self.rng.random_bool(0.5) {
                    Direction::TargetToReference
                } else {
                    Direction::ReferenceToTarget
                }
            }
        };

        let target_code = self.state.target_language.clone();
        let reference_code = self.state.reference_language.clone();
        let target_placeholder;
        let target = match dataset.entry(&target_code, index) {
            Some(entry) => entry,
            None => {
                target_placeholder = WordEntry::placeholder(&target_code, index);
                &target_placeholder
            }
        };
        let reference_placeholder;
        let reference = match dataset.entry(&reference_code, index) {
            Some(entry) => entry,
            None => {
                reference_placeholder = WordEntry::placeholder(&reference_code, index);
                &reference_placeholder
            }
        };

        let (from, to) = match direction {
            Direction::TargetToReference => (target, reference),
            Direction::ReferenceToTarget => (reference, target),
        };

        let is_verb = dataset
            .concept(index)
            .is_some_and(|c| c.part_of_speech == PartOfSpeech::Verb);
        let current_verb = (is_verb && conjugation::is_conjugable(target)).then(|| VerbRef {
            language: target_code.clone(),
            index,
        });

        self.timer.disarm();
        let state = &mut self.state;
        state.generation += 1;
        state.concept_index = index;
        state.direction = direction;
        state.prompt = Prompt {
            shown_word: from.surface_form.clone(),
            shown_pronunciation: from.pronunciation.clone(),
            expected_answer: to.surface_form.clone(),
            answer_pronunciation: to.pronunciation.clone(),
        };
        state.current_verb = current_verb;
        state.is_conjugating = false;
        state.tense = None;
        state.person = None;
        state.phase = AnswerPhase::Hidden;
        state.feedback = None;

        tracing::debug!(
            session = %state.id,
            turn = state.generation,
            concept = index,
            ?direction,
            "turn started"
        );
    }

    /// Check a guess against the expected answer.
    pub fn submit_guess(&mut self, text: &str) -> Transition {
        if self.state.phase != AnswerPhase::Hidden {
            return Transition::Ignored;
        }
        let correct = answers_match(text, &self.state.prompt.expected_answer);
        if correct {
            self.state.score.record_correct();
            self.state.tally.correct += 1;
        } else {
            self.state.score.record_miss();
            self.state.tally.incorrect += 1;
        }
        let feedback = if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };
        self.finish_turn(feedback)
    }

    /// Show the answer without credit.
    pub fn reveal_answer(&mut self) -> Transition {
        if self.state.phase != AnswerPhase::Hidden {
            return Transition::Ignored;
        }
        self.state.score.record_miss();
        self.state.tally.revealed += 1;
        self.finish_turn(Feedback::Revealed)
    }

    /// Skip (counted as correct) or move on to the next turn.
    pub fn advance(&mut self) -> Transition {
        self.advance_at(Instant::now())
    }

    pub fn advance_at(&mut self, now: Instant) -> Transition {
        match self.state.phase {
            AnswerPhase::Hidden => {
                self.state.score.record_correct();
                self.state.tally.counted_correct += 1;
                let transition = self.finish_turn(Feedback::CountedCorrect);
                self.timer.arm(self.state.generation, now);
                transition
            }
            AnswerPhase::Revealed => {
                self.next_turn();
                Transition::TurnStarted
            }
        }
    }

    /// Fire the delayed transition if it is due. Returns whether a new turn
    /// started.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.timer.take_due(now, self.state.generation) {
            self.next_turn();
            true
        } else {
            false
        }
    }

    /// Change the language pair and start a new turn. Scores are kept.
    pub fn set_languages(
        &mut self,
        target: &str,
        reference: &str,
    ) -> Result<Transition, DrillError> {
        for code in [target, reference] {
            if !self.dataset.has_language(code) {
                return Err(DrillError::UnknownLanguage(code.to_string()));
            }
        }

        let mut corrected = None;
        let reference = if target == reference {
            let replacement = self
                .dataset
                .first_other_language(target)
                .unwrap_or(target)
                .to_string();
            tracing::info!(
                "{}, using '{replacement}' as reference",
                DrillError::SameLanguageSelected {
                    language: target.to_string()
                }
            );
            corrected = Some(replacement.clone());
            replacement
        } else {
            reference.to_string()
        };

        self.state.target_language = target.to_string();
        self.state.reference_language = reference;
        self.start_turn();

        Ok(match corrected {
            Some(reference) => Transition::LanguagesCorrected { reference },
            None => Transition::TurnStarted,
        })
    }

    /// Change the interaction mode and start a new turn. Scores are kept.
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) -> Transition {
        self.state.mode = mode;
        self.start_turn();
        Transition::TurnStarted
    }

    /// Enter or leave conjugation mode for the current verb.
    pub fn toggle_conjugation(&mut self) -> Transition {
        if self.state.is_conjugating {
            self.start_turn();
            return Transition::TurnStarted;
        }
        if self.state.current_verb.is_none() {
            return Transition::Ignored;
        }
        match self.start_conjugation_prompt() {
            Ok(()) => Transition::TurnStarted,
            Err(e) => {
                tracing::warn!(session = %self.state.id, "refusing conjugation: {e}");
                Transition::ConjugationRefused(e)
            }
        }
    }

    /// Summary of the run so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct: self.state.score.correct(),
            total: self.state.score.total(),
            accuracy: self.state.score.accuracy(),
            tally: self.state.tally,
            turns_started: self.state.generation,
        }
    }

    /// The view-model of the current turn.
    pub fn view(&self) -> TurnView {
        let state = &self.state;
        let concept = self.dataset.concept(state.concept_index);
        let revealed = state.phase == AnswerPhase::Revealed;

        let (icon, part_of_speech) = if state.is_conjugating {
            (CONJUGATION_ICON.to_string(), CONJUGATION_LABEL.to_string())
        } else {
            (
                concept
                    .map(|c| c.icon.clone())
                    .unwrap_or_else(|| crate::parser::UNKNOWN_ICON.to_string()),
                concept
                    .map(|c| c.part_of_speech.to_string())
                    .unwrap_or_else(|| PartOfSpeech::Noun.to_string()),
            )
        };

        let conjugation = match (state.is_conjugating, state.tense, state.person) {
            (true, Some(tense), Some(person)) => Some(ConjugationTags {
                tense: tense.to_string(),
                person: person.label().to_string(),
            }),
            _ => None,
        };

        TurnView {
            shown_word: state.prompt.shown_word.clone(),
            shown_pronunciation: state.prompt.shown_pronunciation.clone(),
            icon,
            part_of_speech,
            conjugation,
            phase: state.phase,
            revealed_answer: revealed.then(|| state.prompt.expected_answer.clone()),
            revealed_pronunciation: revealed.then(|| state.prompt.answer_pronunciation.clone()),
            feedback: state.feedback,
            score: state.score,
            accuracy: state.score.accuracy(),
            conjugation_available: state.current_verb.is_some(),
            conjugating: state.is_conjugating,
            target_language: state.target_language.clone(),
            reference_language: state.reference_language.clone(),
            mode: state.mode,
        }
    }

    fn finish_turn(&mut self, feedback: Feedback) -> Transition {
        if self.state.is_conjugating {
            self.state.tally.conjugation += 1;
        }
        self.state.phase = AnswerPhase::Revealed;
        self.state.feedback = Some(feedback);
        tracing::debug!(
            session = %self.state.id,
            turn = self.state.generation,
            ?feedback,
            correct = self.state.score.correct(),
            total = self.state.score.total(),
            "turn answered"
        );
        Transition::Answered(feedback)
    }

    fn next_turn(&mut self) {
        if !self.state.is_conjugating {
            self.start_turn();
            return;
        }
        if let Err(e) = self.start_conjugation_prompt() {
            tracing::warn!(session = %self.state.id, "leaving conjugation mode: {e}");
            self.start_turn();
        }
    }

    /// Sample a tense and person for the current verb and show the prompt.
    fn start_conjugation_prompt(&mut self) -> Result<(), DrillError> {
        let dataset = Arc::clone(&self.dataset);
        let verb_ref = self.state.current_verb.clone();
        let verb = verb_ref
            .as_ref()
            .and_then(|v| dataset.entry(&v.language, v.index))
            .ok_or_else(|| DrillError::MalformedVerbEntry {
                word: self.state.prompt.shown_word.clone(),
                tense: String::new(),
            })?;

        let tense = Tense::ALL[self.rng.random_range(0..Tense::ALL.len())];
        let person = Person::ALL[self.rng.random_range(0..Person::ALL.len())];
        let expected = conjugation::resolve(verb, tense, person)?;

        self.timer.disarm();
        let state = &mut self.state;
        state.generation += 1;
        state.is_conjugating = true;
        state.tense = Some(tense);
        state.person = Some(person);
        state.prompt = Prompt {
            shown_word: format!("{} →", verb.surface_form),
            shown_pronunciation: verb.pronunciation.clone(),
            expected_answer: expected,
            answer_pronunciation: verb.pronunciation.clone(),
        };
        state.phase = AnswerPhase::Hidden;
        state.feedback = None;

        tracing::debug!(
            session = %state.id,
            turn = state.generation,
            %tense,
            %person,
            "conjugation prompt started"
        );
        Ok(())
    }
}

/// Trim, NFKC-normalize, collapse whitespace and lowercase.
pub fn fold_answer(text: &str) -> String {
    let normalized: String = text.nfkc().collect();
    normalized
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Case-insensitive comparison of a guess with the expected answer.
pub fn answers_match(guess: &str, expected: &str) -> bool {
    fold_answer(guess) == fold_answer(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackLexicon;
    use crate::model::{Concept, ConjugationTable};
    use crate::parser::RawWordRecord;
    use std::collections::BTreeMap;

    fn two_concepts() -> Arc<Dataset> {
        let concepts = vec![
            Concept::new(0, PartOfSpeech::Noun, "🏠"),
            Concept::new(1, PartOfSpeech::Noun, "🏠"),
        ];
        let dataset = crate::dataset::normalize(
            concepts,
            vec![
                (
                    "en".to_string(),
                    vec![RawWordRecord::new("house", "/haʊs/"), RawWordRecord::new("house", "")],
                ),
                (
                    "es".to_string(),
                    vec![RawWordRecord::new("casa", "/ˈka.sa/"), RawWordRecord::new("casa", "")],
                ),
            ],
            &FallbackLexicon::new(),
        )
        .unwrap();
        Arc::new(dataset)
    }

    fn verb_dataset(forms: ConjugationTable) -> Arc<Dataset> {
        let record = RawWordRecord {
            word: Some("go".into()),
            phonetic: Some("/ɡoʊ/".into()),
            forms: Some(serde_json::to_value(forms).unwrap()),
            ..Default::default()
        };
        let dataset = crate::dataset::normalize(
            vec![Concept::new(0, PartOfSpeech::Verb, "🏃")],
            vec![
                ("en".to_string(), vec![record]),
                ("es".to_string(), vec![RawWordRecord::new("ir", "")]),
            ],
            &FallbackLexicon::new(),
        )
        .unwrap();
        Arc::new(dataset)
    }

    fn go_forms() -> ConjugationTable {
        let mut forms = ConjugationTable::new();
        forms.insert(
            "present".into(),
            BTreeMap::from([("*".to_string(), "go".to_string())]),
        );
        forms.insert(
            "past".into(),
            BTreeMap::from([("*".to_string(), "went".to_string())]),
        );
        forms
    }

    fn seeded(dataset: Arc<Dataset>, mode: InteractionMode) -> DrillSession {
        DrillSession::new(
            dataset,
            SessionConfig {
                mode,
                seed: Some(7),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn assert_score_invariant(session: &DrillSession) {
        let score = session.state().score;
        assert!(score.correct() <= score.total());
    }

    #[test]
    fn correct_guess_scenario() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        assert_eq!(session.state().phase, AnswerPhase::Hidden);
        assert_eq!(session.view().shown_word, "house");

        let t = session.submit_guess("casa");
        assert_eq!(t, Transition::Answered(Feedback::Correct));
        assert_eq!(session.state().phase, AnswerPhase::Revealed);
        assert_eq!(session.state().score.correct(), 1);
        assert_eq!(session.state().score.total(), 1);
    }

    #[test]
    fn guess_is_case_and_space_insensitive() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        assert_eq!(
            session.submit_guess("  Casa "),
            Transition::Answered(Feedback::Correct)
        );
        assert!(answers_match("Casa", "casa"));
        assert!(answers_match("sala  de\testar", "Sala de estar"));
        assert!(!answers_match("cas", "casa"));
    }

    #[test]
    fn guess_matches_across_unicode_forms() {
        // decomposed "n" + combining tilde vs precomposed "ñ"
        assert!(answers_match("ban\u{303}o", "baño"));
        // full-width input
        assert!(answers_match("ＣＡＳＡ", "casa"));
    }

    #[test]
    fn wrong_guess_counts_total_only() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        assert_eq!(
            session.submit_guess("maison"),
            Transition::Answered(Feedback::Incorrect)
        );
        assert_eq!(session.state().score.correct(), 0);
        assert_eq!(session.state().score.total(), 1);
    }

    #[test]
    fn submit_and_reveal_are_noops_once_revealed() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        session.reveal_answer();
        let before = session.state().score;
        assert_eq!(session.submit_guess("casa"), Transition::Ignored);
        assert_eq!(session.reveal_answer(), Transition::Ignored);
        assert_eq!(session.state().score, before);
        assert_eq!(session.state().feedback, Some(Feedback::Revealed));
    }

    #[test]
    fn reveal_gives_no_credit() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        assert_eq!(
            session.reveal_answer(),
            Transition::Answered(Feedback::Revealed)
        );
        let view = session.view();
        assert_eq!(view.revealed_answer.as_deref(), Some("casa"));
        assert_eq!(view.score.correct(), 0);
        assert_eq!(view.score.total(), 1);
    }

    #[test]
    fn answer_hidden_until_revealed() {
        let session = seeded(two_concepts(), InteractionMode::TargetToReference);
        let view = session.view();
        assert_eq!(view.phase, AnswerPhase::Hidden);
        assert!(view.revealed_answer.is_none());
        assert!(view.revealed_pronunciation.is_none());
    }

    #[test]
    fn skipping_counts_as_correct_and_arms_timer() {
        let start = Instant::now();
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        let generation = session.state().generation;

        let t = session.advance_at(start);
        assert_eq!(t, Transition::Answered(Feedback::CountedCorrect));
        assert_eq!(session.state().score.correct(), 1);
        assert_eq!(session.state().score.total(), 1);
        assert_eq!(session.pending_deadline(), Some(start + DEFAULT_HOLD));

        assert!(!session.tick(start + Duration::from_millis(10)));
        assert!(session.tick(start + DEFAULT_HOLD));
        assert_eq!(session.state().generation, generation + 1);
        assert_eq!(session.state().phase, AnswerPhase::Hidden);
        assert!(session.pending_deadline().is_none());
    }

    #[test]
    fn advancing_before_hold_cancels_pending_transition() {
        let start = Instant::now();
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        let generation = session.state().generation;

        session.advance_at(start);
        assert_eq!(session.advance_at(start), Transition::TurnStarted);
        assert_eq!(session.state().generation, generation + 1);

        // The stale deadline must not start another turn.
        assert!(!session.tick(start + DEFAULT_HOLD * 3));
        assert_eq!(session.state().generation, generation + 1);
    }

    #[test]
    fn each_advance_from_revealed_starts_exactly_one_turn() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        for _ in 0..5 {
            session.reveal_answer();
            let before = session.state().generation;
            assert_eq!(session.advance(), Transition::TurnStarted);
            assert_eq!(session.state().generation, before + 1);
            assert_score_invariant(&session);
        }
    }

    #[test]
    fn mode_change_cancels_pending_transition() {
        let start = Instant::now();
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        session.advance_at(start);
        session.set_interaction_mode(InteractionMode::ReferenceToTarget);
        let generation = session.state().generation;
        assert!(session.pending_deadline().is_none());
        assert!(!session.tick(start + DEFAULT_HOLD));
        assert_eq!(session.state().generation, generation);
        assert_eq!(session.view().shown_word, "casa");
        // score survives the mode change
        assert_eq!(session.state().score.total(), 1);
    }

    #[test]
    fn same_language_is_corrected_to_next_loaded() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        session.reveal_answer();
        let t = session.set_languages("en", "en").unwrap();
        assert_eq!(
            t,
            Transition::LanguagesCorrected {
                reference: "es".into()
            }
        );
        assert_eq!(session.state().target_language, "en");
        assert_eq!(session.state().reference_language, "es");
        assert_eq!(session.state().phase, AnswerPhase::Hidden);
        assert_eq!(session.state().score.total(), 1);
    }

    #[test]
    fn unknown_language_leaves_state_unchanged() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        let generation = session.state().generation;
        let err = session.set_languages("en", "ja").unwrap_err();
        assert_eq!(err, DrillError::UnknownLanguage("ja".into()));
        assert_eq!(session.state().generation, generation);
        assert_eq!(session.state().reference_language, "es");
    }

    #[test]
    fn reversed_direction_swaps_sides() {
        let mut session = seeded(two_concepts(), InteractionMode::ReferenceToTarget);
        assert_eq!(session.state().direction, Direction::ReferenceToTarget);
        assert_eq!(session.view().shown_word, "casa");
        assert_eq!(
            session.submit_guess("HOUSE"),
            Transition::Answered(Feedback::Correct)
        );
    }

    #[test]
    fn random_mode_samples_both_directions() {
        let mut session = seeded(two_concepts(), InteractionMode::Random);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            session.start_turn();
            seen.insert(session.state().direction);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn direction_is_stable_within_a_turn() {
        let mut session = seeded(two_concepts(), InteractionMode::Random);
        let direction = session.state().direction;
        let shown = session.view().shown_word;
        session.submit_guess("nothing");
        assert_eq!(session.state().direction, direction);
        assert_eq!(session.view().shown_word, shown);
    }

    #[test]
    fn noun_turns_offer_no_conjugation() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        assert!(!session.view().conjugation_available);
        assert_eq!(session.toggle_conjugation(), Transition::Ignored);
        assert!(!session.state().is_conjugating);
    }

    #[test]
    fn conjugation_round_trip() {
        let mut session = seeded(verb_dataset(go_forms()), InteractionMode::TargetToReference);
        assert!(session.view().conjugation_available);
        assert_eq!(session.current_verb().unwrap().surface_form, "go");

        assert_eq!(session.toggle_conjugation(), Transition::TurnStarted);
        let view = session.view();
        assert!(view.conjugating);
        assert_eq!(view.shown_word, "go →");
        assert_eq!(view.icon, CONJUGATION_ICON);
        assert_eq!(view.part_of_speech, CONJUGATION_LABEL);
        let tags = view.conjugation.unwrap();
        let expected = if tags.tense == "present" { "go" } else { "went" };

        assert_eq!(
            session.submit_guess(expected),
            Transition::Answered(Feedback::Correct)
        );
        assert_eq!(session.state().tally.conjugation, 1);

        // advancing stays in conjugation mode
        assert_eq!(session.advance(), Transition::TurnStarted);
        assert!(session.state().is_conjugating);
        assert!(session.state().tense.is_some());

        // toggling again returns to normal turns
        assert_eq!(session.toggle_conjugation(), Transition::TurnStarted);
        assert!(!session.state().is_conjugating);
        assert!(session.view().conjugation.is_none());
        assert_eq!(session.view().shown_word, "go");
    }

    #[test]
    fn conjugation_counted_correct_holds_then_new_prompt() {
        let start = Instant::now();
        let mut session = seeded(verb_dataset(go_forms()), InteractionMode::TargetToReference);
        session.toggle_conjugation();
        session.advance_at(start);
        assert!(session.tick(start + DEFAULT_HOLD));
        assert!(session.state().is_conjugating);
        assert_eq!(session.state().phase, AnswerPhase::Hidden);
    }

    #[test]
    fn conjugation_not_offered_without_every_tense() {
        let mut present_only = ConjugationTable::new();
        present_only.insert(
            "present".into(),
            BTreeMap::from([("*".to_string(), "go".to_string())]),
        );
        let dataset = verb_dataset(present_only);
        for seed in 0..40 {
            let mut session = DrillSession::new(
                Arc::clone(&dataset),
                SessionConfig {
                    seed: Some(seed),
                    ..Default::default()
                },
            )
            .unwrap();
            assert!(!session.view().conjugation_available, "seed {seed}");
            assert!(session.current_verb().is_none());
            let generation = session.state().generation;
            assert_eq!(session.toggle_conjugation(), Transition::Ignored);
            assert!(!session.state().is_conjugating);
            assert_eq!(session.state().generation, generation);
        }
    }

    #[test]
    fn conjugation_stays_on_for_complete_verb() {
        for seed in 0..40 {
            let mut session = DrillSession::new(
                verb_dataset(go_forms()),
                SessionConfig {
                    seed: Some(seed),
                    ..Default::default()
                },
            )
            .unwrap();
            assert_eq!(session.toggle_conjugation(), Transition::TurnStarted);
            for _ in 0..10 {
                session.reveal_answer();
                assert_eq!(session.advance(), Transition::TurnStarted);
                assert!(session.state().is_conjugating, "seed {seed}");
            }
        }
    }

    #[test]
    fn score_invariant_holds_across_random_intents() {
        let mut session = seeded(verb_dataset(go_forms()), InteractionMode::Random);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let intent = match rng.random_range(0..6) {
                0 => Intent::SubmitGuess("go".into()),
                1 => Intent::RevealAnswer,
                2 => Intent::Advance,
                3 => Intent::ToggleConjugation,
                4 => Intent::SetLanguages {
                    target: "es".into(),
                    reference: "es".into(),
                },
                _ => Intent::SetInteractionMode(InteractionMode::Random),
            };
            session.apply(intent).unwrap();
            assert_score_invariant(&session);
            assert!(session.view().accuracy <= 100);
        }
    }

    #[test]
    fn rejects_unloaded_preferences() {
        let err = DrillSession::new(
            two_concepts(),
            SessionConfig {
                target_language: Some("ja".into()),
                ..Default::default()
            },
        )
        .err()
        .unwrap();
        assert_eq!(err, DrillError::UnknownLanguage("ja".into()));
    }

    #[test]
    fn same_language_preferences_pick_distinct_reference() {
        let session = DrillSession::new(
            two_concepts(),
            SessionConfig {
                target_language: Some("es".into()),
                reference_language: Some("es".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(session.state().reference_language, "en");
    }

    #[test]
    fn summary_reports_tally() {
        let mut session = seeded(two_concepts(), InteractionMode::TargetToReference);
        session.submit_guess("casa");
        session.advance();
        session.reveal_answer();
        session.advance();
        session.advance();
        let summary = session.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.accuracy, 67);
        assert_eq!(summary.tally.correct, 1);
        assert_eq!(summary.tally.revealed, 1);
        assert_eq!(summary.tally.counted_correct, 1);
        assert_eq!(summary.tally.answered(), 3);
    }
}
