//! Core flashcard library shared by the command-line front-end.
//!
//! Provides:
//! - Card and deck model with JSON encoding and validation
//! - Deck filename derivation
//! - Editor text-template protocol (build, strip instructions, parse)
//! - Study session primitives (ordering, key actions, headers)

pub mod editor;
pub mod error;
pub mod study;
pub mod types;

pub use editor::{card_template, parse_card_edit, remove_instructions};
pub use error::{CardError, CorruptDeck, EditError, Result};
pub use study::{question_header, Action, Order};
pub use types::{derive_filename, Card, Deck, DECK_EXTENSION};
