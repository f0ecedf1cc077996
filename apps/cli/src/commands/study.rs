//! Study session command.

use super::deck::{NO_SELECTED_DECK, NO_SUCH_DECK};
use super::App;
use crate::console::Console;
use crate::editor::EditorRunner;
use crate::store::StoreError;
use crate::study::{SessionSummary, StudyItem, StudySession, ALL_DECKS};
use anyhow::Result;
use flashcard_core::Order;
use rand::Rng;
use tracing::info;

/// Study the selected deck, a named deck, or every deck at once.
///
/// Returns `None` when no session was started.
pub fn study<E, C, R>(
    app: &App<E>,
    console: &mut C,
    target: Option<&str>,
    ordered: bool,
    rng: &mut R,
) -> Result<Option<SessionSummary>>
where
    E: EditorRunner,
    C: Console + ?Sized,
    R: Rng + ?Sized,
{
    let (items, label, aggregated) = match target {
        Some(ALL_DECKS) => {
            let items: Vec<_> = app
                .store
                .load_all()?
                .iter()
                .flat_map(StudyItem::from_deck)
                .collect();
            (items, None, true)
        }
        Some(name) => match app.store.load(&app.store.deck_path(name)) {
            Ok(deck) => (StudyItem::from_deck(&deck), Some(deck.name), false),
            Err(StoreError::NotFound(_)) => {
                console.write_line(NO_SUCH_DECK)?;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        },
        None => match app.store.load_selected_deck() {
            Ok(deck) => (StudyItem::from_deck(&deck), Some(deck.name), false),
            Err(StoreError::NotFound(_)) => {
                console.write_line(NO_SELECTED_DECK)?;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        },
    };

    if items.is_empty() {
        let message = match label {
            Some(name) => format!("The {name} deck currently has no cards."),
            None => "There are no cards to study.".to_string(),
        };
        console.write_line(&message)?;
        return Ok(None);
    }

    let summary = StudySession::new(&app.store, console, &app.editor, items)?
        .show_origin(aggregated)
        .run(Order::from_flag(ordered), rng)?;
    info!(
        shown = summary.shown,
        edited = summary.edited,
        quit = summary.quit,
        "study session ended"
    );
    Ok(Some(summary))
}
