//! Card-related commands.

use super::{prompt, App};
use crate::editor::{write_via_editor, EditorRunner};
use crate::store::StoreError;
use anyhow::Result;
use flashcard_core::editor::{NEW_ANSWER_TEMPLATE, NEW_QUESTION_TEMPLATE};
use flashcard_core::Card;
use std::io::{BufRead, Write};
use tracing::info;

/// How the question and answer of a new card are collected.
#[derive(Debug, Clone, Default)]
pub struct NewCard {
    pub question: Option<String>,
    pub answer: Option<String>,
    /// Collect missing fields through the editor instead of prompting.
    pub editor_mode: bool,
}

/// Append a card to the selected deck.
pub fn add<E, R, W>(app: &App<E>, input: &mut R, out: &mut W, new_card: NewCard) -> Result<()>
where
    E: EditorRunner,
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let mut deck = match app.store.load_selected_deck() {
        Ok(deck) => deck,
        Err(StoreError::NotFound(_)) => {
            writeln!(
                out,
                "There is no deck currently selected. Select a deck to add a card."
            )?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut collect = |given: Option<String>, label: &str, template: &str| -> Result<String> {
        Ok(match given {
            Some(text) => text,
            None if new_card.editor_mode => write_via_editor(&app.editor, template)?,
            None => prompt(&mut *input, &mut *out, label)?,
        })
    };

    let question = collect(new_card.question, "Question", NEW_QUESTION_TEMPLATE)?;
    let answer = collect(new_card.answer, "Answer", NEW_ANSWER_TEMPLATE)?;

    if question.trim().is_empty() {
        writeln!(out, "The question cannot be empty; no card was added.")?;
        return Ok(());
    }
    if answer.trim().is_empty() {
        writeln!(out, "The answer cannot be empty; no card was added.")?;
        return Ok(());
    }

    deck.add(Card::new(question, answer));
    app.store.save(&deck)?;
    info!(deck = %deck.name, cards = deck.len(), "added card");

    writeln!(out, "Card added to the deck!")?;
    Ok(())
}
