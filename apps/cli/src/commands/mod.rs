//! Command handlers behind the `flashcards` subcommands.

pub mod card;
pub mod deck;
pub mod study;

pub use card::{add, NewCard};
pub use deck::{create, list, rename, select, status};
pub use study::study;

use crate::editor::{EditorRunner, SystemEditor};
use crate::store::DeckStore;
use std::io::{self, BufRead, Write};

/// Collaborators shared by every command.
#[derive(Debug, Clone)]
pub struct App<E = SystemEditor> {
    pub store: DeckStore,
    pub editor: E,
}

impl<E: EditorRunner> App<E> {
    pub fn new(store: DeckStore, editor: E) -> Self {
        Self { store, editor }
    }
}

/// Ask for one line of input, without its line ending.
pub fn prompt<R, W>(input: &mut R, out: &mut W, label: &str) -> io::Result<String>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(out, "{label}: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
