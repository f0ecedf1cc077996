//! Test fixtures for creating sample decks.

use flashcard_core::editor::{ANSWER_MARKER, QUESTION_MARKER};
use flashcard_core::{Card, Deck};
use flashcards_cli::store::DeckStore;

pub const MATH_QUESTIONS: [&str; 4] = ["2 + 2 = ?", "2 + 3 = ?", "2 + 4 = ?", "2 + 5 = ?"];

/// Four arithmetic cards, in storage order.
pub fn math_deck(store: &DeckStore) -> Deck {
    let mut deck = store.new_deck("Basic Math", Some("Simple arithmetic".to_string()));
    for (question, answer) in MATH_QUESTIONS.iter().zip(["4", "5", "6", "7"]) {
        deck.add(Card::new(*question, answer));
    }
    deck
}

/// Two science cards.
pub fn science_deck(store: &DeckStore) -> Deck {
    let mut deck = store.new_deck("Science", None);
    deck.add(Card::new("H2O is?", "Water"));
    deck.add(Card::new("NaCl is?", "Salt"));
    deck
}

pub fn empty_deck(store: &DeckStore) -> Deck {
    store.new_deck("Empty", Some("Nothing here yet".to_string()))
}

/// Buffer a user would leave behind after editing a card to `question`/`answer`.
pub fn edited_buffer(question: &str, answer: &str) -> String {
    format!("{question}\n{QUESTION_MARKER}\n{answer}\n{ANSWER_MARKER}\n")
}
