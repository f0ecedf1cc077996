//! Interactive study sessions.
//!
//! Each card moves through `question shown -> answer revealed -> action`.
//! Both steps wait for a single key press with no timeout. Edits are written
//! back to the card's origin deck on disk, not to the in-memory session, so
//! sessions that aggregate every deck update the right file.

use crate::console::Console;
use crate::editor::{edit_card, CardEditError, EditorError, EditorRunner};
use crate::store::{DeckStore, StoreError};
use flashcard_core::{question_header, Action, Card, Deck, EditError, Order};
use rand::Rng;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Study target that aggregates every deck in storage.
pub const ALL_DECKS: &str = "all";

pub const PAUSE_PROMPT: &str = "...";
pub const CONTROL_HINT: &str =
    "Press any key to show the next question, 'e' to edit this card, or 'q' to quit.";
pub const COMPLETION_MESSAGE: &str = "All done!";

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("no cards to study")]
    NoCards,

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("terminal: {0}")]
    Console(#[from] io::Error),
}

/// A card together with the deck it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyItem {
    pub card: Card,
    pub deck_name: String,
    pub deck_path: PathBuf,
}

impl StudyItem {
    /// Tag every card of `deck` with its origin, in storage order.
    pub fn from_deck(deck: &Deck) -> Vec<Self> {
        deck.cards
            .iter()
            .map(|card| Self {
                card: card.clone(),
                deck_name: deck.name.clone(),
                deck_path: deck.path().to_path_buf(),
            })
            .collect()
    }
}

/// Counts reported once a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub shown: usize,
    pub edited: usize,
    pub quit: bool,
}

pub struct StudySession<'a, C: ?Sized, E: ?Sized> {
    store: &'a DeckStore,
    console: &'a mut C,
    editor: &'a E,
    items: Vec<StudyItem>,
    show_origin: bool,
}

impl<'a, C, E> StudySession<'a, C, E>
where
    C: Console + ?Sized,
    E: EditorRunner + ?Sized,
{
    /// Refuses to build a session without cards.
    pub fn new(
        store: &'a DeckStore,
        console: &'a mut C,
        editor: &'a E,
        items: Vec<StudyItem>,
    ) -> Result<Self, StudyError> {
        if items.is_empty() {
            return Err(StudyError::NoCards);
        }
        Ok(Self {
            store,
            console,
            editor,
            items,
            show_origin: false,
        })
    }

    /// Name the origin deck in every question header.
    pub fn show_origin(mut self, show: bool) -> Self {
        self.show_origin = show;
        self
    }

    pub fn run<R: Rng + ?Sized>(
        mut self,
        order: Order,
        rng: &mut R,
    ) -> Result<SessionSummary, StudyError> {
        order.arrange(&mut self.items, rng);
        debug!(cards = self.items.len(), ?order, "starting study session");

        let total = self.items.len();
        let mut summary = SessionSummary::default();

        for index in 0..total {
            summary.shown += 1;
            match self.present(index, total)? {
                Action::Quit => {
                    summary.quit = true;
                    return Ok(summary);
                }
                Action::Edit => {
                    if self.edit(index)? {
                        summary.edited += 1;
                    }
                }
                Action::Advance => {}
            }
        }

        self.console.write_line(COMPLETION_MESSAGE)?;
        Ok(summary)
    }

    fn present(&mut self, index: usize, total: usize) -> Result<Action, StudyError> {
        let item = &self.items[index];
        let origin = self.show_origin.then_some(item.deck_name.as_str());
        let header = question_header(index + 1, total, origin);
        let question = item.card.question.clone();
        let answer = item.card.answer.clone();

        self.console.clear()?;
        self.console.write_line(&header)?;
        self.console.write_line("")?;
        self.console.write_line(&question)?;
        self.console.write_line("")?;
        self.console.write_line(PAUSE_PROMPT)?;
        self.console.read_key()?;

        self.console.write_line("")?;
        self.console.write_line(&answer)?;
        self.console.write_line("")?;
        self.console.write_line(CONTROL_HINT)?;
        let key = self.console.read_key()?;
        Ok(Action::from_key(key))
    }

    /// Returns whether an edit was saved. Rejected edits leave both the
    /// session copy and the file untouched.
    fn edit(&mut self, index: usize) -> Result<bool, StudyError> {
        let before = self.items[index].card.clone();
        let deck_path = self.items[index].deck_path.clone();
        let deck_name = self.items[index].deck_name.clone();

        let (saved, message) = match edit_card(self.editor, &before) {
            Ok(after) => match self.store.replace_card(&deck_path, &before, after.clone()) {
                Ok(_) => {
                    self.items[index].card = after;
                    (true, format!("Card edited and saved to the {deck_name} deck."))
                }
                Err(StoreError::CardNotFound { .. }) => (
                    false,
                    format!("That card is no longer in the {deck_name} deck; edit discarded."),
                ),
                Err(e) => return Err(e.into()),
            },
            Err(CardEditError::Rejected(EditError::NoEditsMade)) => {
                (false, "No edits made; the card is unchanged.".to_string())
            }
            Err(CardEditError::Rejected(EditError::InstructionsRemoved)) => (
                false,
                "Instruction lines were removed, so the edit was discarded.".to_string(),
            ),
            Err(CardEditError::Rejected(rejection)) => {
                (false, format!("Edit discarded: {rejection}."))
            }
            Err(CardEditError::Editor(e)) => return Err(e.into()),
        };

        self.console.write_line("")?;
        self.console.write_line(&message)?;
        self.console.write_line(PAUSE_PROMPT)?;
        self.console.read_key()?;
        Ok(saved)
    }
}
