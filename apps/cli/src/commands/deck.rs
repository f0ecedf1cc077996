//! Deck-related commands.

use super::App;
use crate::store::StoreError;
use anyhow::{Context, Result};
use flashcard_core::derive_filename;
use flashcard_core::DECK_EXTENSION;
use std::io::Write;
use tracing::warn;

pub const NO_SELECTED_DECK: &str = "No deck currently selected.";
pub const NO_SUCH_DECK: &str = "No deck by that name found.";

/// Create a deck and select it.
pub fn create<E, W>(app: &App<E>, out: &mut W, name: &str, description: &str) -> Result<()>
where
    W: Write + ?Sized,
{
    if derive_filename(name) == DECK_EXTENSION {
        writeln!(out, "A deck name needs at least one letter or digit.")?;
        return Ok(());
    }

    let deck = app.store.new_deck(name, Some(description.to_string()));
    match app.store.create(&deck) {
        Ok(()) => {}
        Err(StoreError::AlreadyExists(_)) => {
            writeln!(out, "A deck named \"{name}\" already exists.")?;
            return Ok(());
        }
        Err(e) => return Err(e).context("creating deck"),
    }

    app.store.link_selected_deck(deck.path())?;
    writeln!(out, "Deck created!")?;
    Ok(())
}

/// Make `name` the deck new cards go to and `study` opens by default.
pub fn select<E, W>(app: &App<E>, out: &mut W, name: &str) -> Result<()>
where
    W: Write + ?Sized,
{
    let path = app.store.deck_path(name);
    let deck = match app.store.load(&path) {
        Ok(deck) => deck,
        Err(StoreError::NotFound(_)) => {
            writeln!(out, "{NO_SUCH_DECK}")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    app.store.link_selected_deck(deck.path())?;
    writeln!(out, "Selected deck: {}", deck.name)?;
    writeln!(out, "New cards will be added to this deck.")?;
    Ok(())
}

/// Show every deck with its card count, marking the selected one.
pub fn list<E, W>(app: &App<E>, out: &mut W) -> Result<()>
where
    W: Write + ?Sized,
{
    let files = app.store.deck_files()?;
    if files.is_empty() {
        writeln!(out, "No decks yet. Create one with `flashcards create`.")?;
        return Ok(());
    }

    let selected = app.store.selected_deck_file().ok();
    for path in files {
        let marker = if selected.as_deref() == Some(path.as_path()) {
            '*'
        } else {
            ' '
        };
        match app.store.load(&path) {
            Ok(deck) => {
                let noun = if deck.len() == 1 { "card" } else { "cards" };
                writeln!(out, "{marker} {} ({} {noun})", deck.name, deck.len())?;
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable deck");
                writeln!(out, "{marker} {} (unreadable: {e})", path.display())?;
            }
        }
    }
    Ok(())
}

/// Describe the selected deck.
pub fn status<E, W>(app: &App<E>, out: &mut W) -> Result<()>
where
    W: Write + ?Sized,
{
    let deck = match app.store.load_selected_deck() {
        Ok(deck) => deck,
        Err(StoreError::NotFound(_)) => {
            writeln!(out, "{NO_SELECTED_DECK}")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    writeln!(out)?;
    writeln!(out, "Currently selected deck: {}", deck.name)?;
    writeln!(out, "Number of cards: {}", deck.len())?;
    if !deck.description.is_empty() {
        writeln!(out, "Description: {}", deck.description)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Rename the selected deck, moving its file to match.
pub fn rename<E, W>(app: &App<E>, out: &mut W, new_name: &str) -> Result<()>
where
    W: Write + ?Sized,
{
    if derive_filename(new_name) == DECK_EXTENSION {
        writeln!(out, "A deck name needs at least one letter or digit.")?;
        return Ok(());
    }

    let mut deck = match app.store.load_selected_deck() {
        Ok(deck) => deck,
        Err(StoreError::NotFound(_)) => {
            writeln!(out, "{NO_SELECTED_DECK}")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let old_name = deck.name.clone();
    match app.store.rename(&mut deck, new_name) {
        Ok(()) => {
            writeln!(out, "Renamed \"{old_name}\" to \"{}\".", deck.name)?;
            Ok(())
        }
        Err(StoreError::AlreadyExists(_)) => {
            writeln!(out, "A deck named \"{new_name}\" already exists.")?;
            Ok(())
        }
        Err(e) => Err(e).context("renaming deck"),
    }
}
