//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using CorruptDeck.
pub type Result<T> = std::result::Result<T, CorruptDeck>;

/// Errors raised while decoding a single card record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("card is not an object")]
    NotAnObject,

    #[error("card is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("card field '{0}' is not a string")]
    NotAString(&'static str),
}

/// Structurally invalid deck content.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorruptDeck {
    #[error("deck is not valid JSON: {0}")]
    Malformed(String),

    #[error("deck is not a JSON object")]
    NotAnObject,

    #[error("deck is missing the '{0}' key")]
    MissingField(&'static str),

    #[error("deck field '{0}' is not a string")]
    NotAString(&'static str),

    #[error("deck 'cards' value is not a list")]
    CardsNotAList,

    #[error("card {index} is invalid: {source}")]
    InvalidCard {
        index: usize,
        #[source]
        source: CardError,
    },
}

/// Rejections from the editor text-template protocol.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("no edits were made")]
    NoEditsMade,

    #[error("instruction lines were removed")]
    InstructionsRemoved,

    #[error("the question cannot be empty")]
    EmptyQuestion,

    #[error("the answer cannot be empty")]
    EmptyAnswer,
}
