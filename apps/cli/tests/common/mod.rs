//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext with a throwaway storage directory
//! - ScriptedConsole feeding canned key presses and capturing output
//! - ScriptedEditor standing in for the external editor process

#![allow(dead_code)]

pub mod fixtures;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use flashcard_core::Deck;
use flashcards_cli::commands::App;
use flashcards_cli::console::Console;
use flashcards_cli::editor::{EditorError, EditorExit, EditorRunner};
use flashcards_cli::store::DeckStore;

/// Key returned once the script runs out; advances like any ordinary key.
pub const DEFAULT_KEY: char = ' ';

/// Console that replays key presses and records everything written.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    keys: VecDeque<char>,
    pub output: String,
    pub clears: usize,
    pub keys_read: usize,
}

impl ScriptedConsole {
    pub fn new(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect(),
            ..Self::default()
        }
    }
}

impl Console for ScriptedConsole {
    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push_str(line);
        self.output.push('\n');
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<char> {
        self.keys_read += 1;
        Ok(self.keys.pop_front().unwrap_or(DEFAULT_KEY))
    }
}

/// What the fake editor does to the buffer on one invocation.
pub enum EditorAction {
    /// Leave the buffer as it is.
    Keep,
    /// Overwrite the buffer with this text.
    Replace(String),
    /// Rewrite the buffer through a function of its current content.
    Edit(fn(&str) -> String),
    /// Behave as if the editor program does not exist.
    Missing,
}

/// Editor double that applies queued actions in order.
#[derive(Default)]
pub struct ScriptedEditor {
    actions: RefCell<VecDeque<EditorAction>>,
    pub opened: RefCell<Vec<PathBuf>>,
}

impl ScriptedEditor {
    pub fn new(actions: impl IntoIterator<Item = EditorAction>) -> Self {
        Self {
            actions: RefCell::new(actions.into_iter().collect()),
            opened: RefCell::default(),
        }
    }

    pub fn push(&self, action: EditorAction) {
        self.actions.borrow_mut().push_back(action);
    }

    pub fn times_opened(&self) -> usize {
        self.opened.borrow().len()
    }
}

impl EditorRunner for ScriptedEditor {
    fn run(&self, path: &Path) -> Result<EditorExit, EditorError> {
        self.opened.borrow_mut().push(path.to_path_buf());
        let action = self
            .actions
            .borrow_mut()
            .pop_front()
            .unwrap_or(EditorAction::Keep);

        match action {
            EditorAction::Keep => {}
            EditorAction::Replace(text) => std::fs::write(path, text)?,
            EditorAction::Edit(rewrite) => {
                let current = std::fs::read_to_string(path)?;
                std::fs::write(path, rewrite(&current))?;
            }
            EditorAction::Missing => {
                return Err(EditorError::Unavailable {
                    editor: "missing-editor".to_string(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                })
            }
        }
        Ok(EditorExit::SUCCESS)
    }
}

/// Test context owning a temporary storage directory.
pub struct TestContext {
    _dir: TempDir,
    pub app: App<ScriptedEditor>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_editor(ScriptedEditor::default())
    }

    pub fn with_editor(editor: ScriptedEditor) -> Self {
        let dir = TempDir::new().expect("Failed to create storage directory");
        let store = DeckStore::new(dir.path());
        Self {
            _dir: dir,
            app: App::new(store, editor),
        }
    }

    pub fn store(&self) -> &DeckStore {
        &self.app.store
    }

    pub fn editor(&self) -> &ScriptedEditor {
        &self.app.editor
    }

    /// Persist `deck` as a new deck file.
    pub fn add_deck(&self, deck: &Deck) {
        self.store().create(deck).expect("Failed to create deck");
    }

    /// Persist `deck` and make it the selected deck.
    pub fn select_deck(&self, deck: &Deck) {
        self.add_deck(deck);
        self.store()
            .link_selected_deck(deck.path())
            .expect("Failed to select deck");
    }

    /// Re-read a deck from disk.
    pub fn reload(&self, deck: &Deck) -> Deck {
        self.store().load(deck.path()).expect("Failed to reload deck")
    }
}

/// Run a command writing to a buffer and return what it printed.
pub fn capture<F>(command: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
{
    let mut out = Vec::new();
    command(&mut out).expect("command failed");
    String::from_utf8(out).expect("output is not UTF-8")
}
