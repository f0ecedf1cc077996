//! Study session primitives shared by every front-end.

use rand::seq::SliceRandom;
use rand::Rng;

/// Key that ends the whole session.
pub const QUIT_KEY: char = 'q';
/// Key that opens the current card in the editor.
pub const EDIT_KEY: char = 'e';

/// What the user asked for after an answer was revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Advance,
    Quit,
    Edit,
}

impl Action {
    /// Any key other than quit or edit advances.
    pub fn from_key(key: char) -> Self {
        match key {
            QUIT_KEY => Self::Quit,
            EDIT_KEY => Self::Edit,
            _ => Self::Advance,
        }
    }
}

/// Presentation order for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Storage order.
    Ordered,
    /// Uniform shuffle, drawn once at session start.
    #[default]
    Shuffled,
}

impl Order {
    pub fn from_flag(ordered: bool) -> Self {
        if ordered {
            Self::Ordered
        } else {
            Self::Shuffled
        }
    }

    pub fn arrange<T, R: Rng + ?Sized>(self, items: &mut [T], rng: &mut R) {
        if self == Self::Shuffled {
            items.shuffle(rng);
        }
    }
}

/// One-indexed header shown above each question.
pub fn question_header(index: usize, total: usize, origin: Option<&str>) -> String {
    match origin {
        Some(deck) => format!("QUESTION {index} / {total} ({deck} deck)"),
        None => format!("QUESTION {index} / {total}"),
    }
}
