//! Core types for flashcard application.

use crate::error::{CardError, CorruptDeck, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Extension of every deck file in storage.
pub const DECK_EXTENSION: &str = ".json";

/// A question/answer pair.
///
/// Cards carry no identity of their own: inside a deck they are located by
/// position, and edit write-back matches them by full content equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub question: String,
    pub answer: String,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Decode a card record, naming the first missing or mistyped field.
    pub fn from_value(value: &Value) -> std::result::Result<Self, CardError> {
        let record = value.as_object().ok_or(CardError::NotAnObject)?;

        let field = |key: &'static str| match record.get(key) {
            None => Err(CardError::MissingField(key)),
            Some(Value::String(text)) => Ok(text.clone()),
            Some(_) => Err(CardError::NotAString(key)),
        };

        Ok(Self {
            question: field("question")?,
            answer: field("answer")?,
        })
    }
}

/// An ordered collection of cards stored in a single file.
///
/// Serializes as `{name, description, cards}` in that key order. The file
/// path is not part of the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    pub name: String,
    pub description: String,
    pub cards: Vec<Card>,
    #[serde(skip)]
    path: PathBuf,
}

impl Deck {
    /// Create an empty deck whose file lives in `dir` under the name derived
    /// from `name`.
    pub fn new(name: impl Into<String>, description: Option<String>, dir: &Path) -> Self {
        let name = name.into();
        let path = dir.join(derive_filename(&name));
        Self {
            name,
            description: description.unwrap_or_default(),
            cards: Vec::new(),
            path,
        }
    }

    /// File this deck is loaded from and saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append a card to the end of the deck.
    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Index of the first card whose question and answer both equal `card`.
    pub fn position_of(&self, card: &Card) -> Option<usize> {
        self.cards.iter().position(|c| c == card)
    }

    /// Change the deck name and re-derive its file path in the same directory.
    ///
    /// Returns the previous path. The caller owns moving the file on disk.
    pub fn rename(&mut self, name: impl Into<String>) -> PathBuf {
        self.name = name.into();
        let dir = self.path.parent().map(Path::to_path_buf).unwrap_or_default();
        std::mem::replace(&mut self.path, dir.join(derive_filename(&self.name)))
    }

    /// Pretty-printed JSON with four-space indentation and a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Decode and validate deck file content. The deck keeps `path` as its
    /// file identity even when `name` would derive a different filename.
    pub fn from_json(content: &str, path: PathBuf) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| CorruptDeck::Malformed(e.to_string()))?;
        Self::from_value(&value, path)
    }

    pub fn from_value(value: &Value, path: PathBuf) -> Result<Self> {
        let record = value.as_object().ok_or(CorruptDeck::NotAnObject)?;

        let name = string_field(record, "name")?;
        let description = string_field(record, "description")?;
        let cards = record
            .get("cards")
            .ok_or(CorruptDeck::MissingField("cards"))?
            .as_array()
            .ok_or(CorruptDeck::CardsNotAList)?
            .iter()
            .enumerate()
            .map(|(index, card)| {
                Card::from_value(card).map_err(|source| CorruptDeck::InvalidCard { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            description,
            cards,
            path,
        })
    }
}

fn string_field(record: &Map<String, Value>, key: &'static str) -> Result<String> {
    match record.get(key) {
        None => Err(CorruptDeck::MissingField(key)),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(CorruptDeck::NotAString(key)),
    }
}

/// Derive a deck filename from its name.
///
/// Spaces and hyphens become underscores, every other character that is not
/// alphanumeric or an underscore is dropped, and the deck extension is
/// appended. An empty stem yields just the extension.
pub fn derive_filename(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    format!("{stem}{DECK_EXTENSION}")
}
