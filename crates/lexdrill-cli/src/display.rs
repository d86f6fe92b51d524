//! Terminal rendering of the drill.

use std::io::Write;

use comfy_table::{Cell, Table};

use lexdrill_core::error::DrillError;
use lexdrill_core::languages::display_name;
use lexdrill_core::statistics::SessionSummary;
use lexdrill_core::traits::DrillDisplay;
use lexdrill_core::view::{AnswerPhase, TurnView};

/// Writes turns as plain text lines.
pub struct ConsoleDisplay<W: Write> {
    out: W,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn render_hidden(&mut self, view: &TurnView) -> std::io::Result<()> {
        writeln!(
            self.out,
            "\n[{} → {}] {}",
            display_name(&view.target_language),
            display_name(&view.reference_language),
            view.mode_indicator()
        )?;
        writeln!(self.out, "{} {}", view.icon, view.part_of_speech)?;
        if view.shown_pronunciation.is_empty() {
            writeln!(self.out, "  {}", view.shown_word)?;
        } else {
            writeln!(self.out, "  {}  {}", view.shown_word, view.shown_pronunciation)?;
        }
        if let Some(tags) = &view.conjugation {
            writeln!(self.out, "  {} tense, {}", tags.tense, tags.person)?;
        }
        if view.conjugation_available && !view.conjugating {
            writeln!(self.out, "  (:conj to drill this verb)")?;
        }
        write!(self.out, "> ")?;
        Ok(())
    }

    fn render_revealed(&mut self, view: &TurnView) -> std::io::Result<()> {
        let feedback = view.feedback.map(|f| f.message()).unwrap_or_default();
        let answer = view.revealed_answer.as_deref().unwrap_or_default();
        match view.revealed_pronunciation.as_deref() {
            Some(p) if !p.is_empty() => writeln!(self.out, "{feedback}  {answer}  {p}")?,
            _ => writeln!(self.out, "{feedback}  {answer}")?,
        }
        writeln!(
            self.out,
            "Score: {}/{} ({}%)",
            view.score.correct(),
            view.score.total(),
            view.accuracy
        )?;
        Ok(())
    }
}

impl<W: Write> DrillDisplay for ConsoleDisplay<W> {
    fn render(&mut self, view: &TurnView) {
        let _ = match view.phase {
            AnswerPhase::Hidden => self.render_hidden(view),
            AnswerPhase::Revealed => self.render_revealed(view),
        };
        let _ = self.out.flush();
    }

    fn notice(&mut self, error: &DrillError) {
        self.line(&format!("Notice: {error}"));
    }

    fn summary(&mut self, summary: &SessionSummary) {
        let table = summary_table(summary);
        self.line(&format!("\n{table}"));
    }
}

/// End-of-run score table.
pub fn summary_table(summary: &SessionSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Result", "Count"]);
    let tally = &summary.tally;
    for (label, count) in [
        ("Correct", tally.correct),
        ("Incorrect", tally.incorrect),
        ("Revealed", tally.revealed),
        ("Counted as correct", tally.counted_correct),
        ("Conjugation turns", tally.conjugation),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("Score"),
        Cell::new(format!("{}/{}", summary.correct, summary.total)),
    ]);
    table.add_row(vec![
        Cell::new("Accuracy"),
        Cell::new(format!("{}%", summary.accuracy)),
    ]);
    table
}
