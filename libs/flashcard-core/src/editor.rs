//! Text templates exchanged with an external editor.
//!
//! # Card template
//! ```text
//! What is Rust?
//! # Edit the question above. Do not remove this line.
//! A systems programming language.
//! # Edit the answer above. Do not remove this line.
//! ```
//!
//! Parsing splits on the last occurrence of each marker line. If the user's
//! own text reproduces a marker line verbatim the split misattributes
//! content; this is a known limitation and is not guessed around.

use crate::error::EditError;
use crate::types::Card;

/// Lines starting with this character are instructions, not content.
pub const COMMENT_MARKER: char = '#';

pub const QUESTION_MARKER: &str = "# Edit the question above. Do not remove this line.";
pub const ANSWER_MARKER: &str = "# Edit the answer above. Do not remove this line.";

/// Initial buffer when writing a new question.
pub const NEW_QUESTION_TEMPLATE: &str = "\n# Write your question above.";
/// Initial buffer when writing a new answer.
pub const NEW_ANSWER_TEMPLATE: &str = "\n# Write your answer above.";

/// Drop every line that begins with the comment marker.
///
/// Remaining lines keep their order; trailing newlines are trimmed so the
/// final split never leaves a dangling blank line. Lines end at `\n` or
/// `\r\n`, so buffers saved with Windows line endings lose their `\r` too.
pub fn remove_instructions(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with(COMMENT_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end_matches('\n')
        .to_string()
}

/// Build the editable buffer for a card.
pub fn card_template(card: &Card) -> String {
    format!(
        "{}\n{QUESTION_MARKER}\n{}\n{ANSWER_MARKER}\n",
        card.question, card.answer
    )
}

/// Recover a card from the text the editor left behind.
///
/// `original` is the buffer produced by [`card_template`]. Identical text
/// means nothing was edited; a missing or misordered marker means the edit
/// cannot be trusted. Lines after the answer marker are discarded.
pub fn parse_card_edit(original: &str, edited: &str) -> Result<Card, EditError> {
    if edited == original {
        return Err(EditError::NoEditsMade);
    }

    let lines: Vec<&str> = edited.lines().collect();
    let question_at = lines.iter().rposition(|line| *line == QUESTION_MARKER);
    let answer_at = lines.iter().rposition(|line| *line == ANSWER_MARKER);

    let (question_at, answer_at) = match (question_at, answer_at) {
        (Some(q), Some(a)) if q < a => (q, a),
        _ => return Err(EditError::InstructionsRemoved),
    };

    let question = lines[..question_at].join("\n");
    let answer = lines[question_at + 1..answer_at].join("\n");

    if question.trim().is_empty() {
        return Err(EditError::EmptyQuestion);
    }
    if answer.trim().is_empty() {
        return Err(EditError::EmptyAnswer);
    }

    Ok(Card { question, answer })
}
