//! Running the user's external editor on a temporary buffer.

use flashcard_core::editor::{card_template, parse_card_edit, remove_instructions};
use flashcard_core::{Card, EditError};
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("cannot start editor '{editor}': {source}")]
    Unavailable {
        editor: String,
        #[source]
        source: io::Error,
    },

    #[error("editor buffer: {0}")]
    Io(#[from] io::Error),
}

/// Failure of a whole card edit: either the editor never ran, or the text it
/// left behind was rejected.
#[derive(Debug, Error)]
pub enum CardEditError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Rejected(#[from] EditError),
}

/// How the editor process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorExit {
    pub success: bool,
    pub code: Option<i32>,
}

impl EditorExit {
    pub const SUCCESS: Self = Self {
        success: true,
        code: Some(0),
    };
}

/// Opens a file for the user and blocks until they are done with it.
pub trait EditorRunner {
    fn run(&self, path: &Path) -> Result<EditorExit, EditorError>;
}

impl<F> EditorRunner for F
where
    F: Fn(&Path) -> Result<EditorExit, EditorError>,
{
    fn run(&self, path: &Path) -> Result<EditorExit, EditorError> {
        self(path)
    }
}

/// Spawns a configured editor command such as `vim` or `code --wait`.
#[derive(Debug, Clone)]
pub struct SystemEditor {
    command: String,
}

impl SystemEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl EditorRunner for SystemEditor {
    fn run(&self, path: &Path) -> Result<EditorExit, EditorError> {
        let mut words = self.command.split_whitespace();
        let program = words.next().ok_or_else(|| EditorError::Unavailable {
            editor: self.command.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty editor command"),
        })?;

        debug!(editor = %self.command, path = %path.display(), "launching editor");
        let status = Command::new(program)
            .args(words)
            .arg(path)
            .status()
            .map_err(|source| EditorError::Unavailable {
                editor: self.command.clone(),
                source,
            })?;

        Ok(EditorExit {
            success: status.success(),
            code: status.code(),
        })
    }
}

/// Write `initial` to a temporary file, let the editor change it, and return
/// what it holds afterwards. The file is removed on every path out.
///
/// An unsuccessful exit is only logged; whatever the editor saved still counts.
pub fn prompt_via_editor<E>(editor: &E, initial: &str) -> Result<String, EditorError>
where
    E: EditorRunner + ?Sized,
{
    let mut buffer = tempfile::Builder::new()
        .prefix("flashcards_")
        .suffix(".txt")
        .tempfile()?;
    buffer.write_all(initial.as_bytes())?;
    buffer.flush()?;

    let exit = editor.run(buffer.path())?;
    if !exit.success {
        warn!(code = ?exit.code, "editor exited unsuccessfully");
    }

    // Editors commonly replace the file instead of writing in place.
    Ok(std::fs::read_to_string(buffer.path())?)
}

/// Collect free text through the editor, dropping instruction lines.
pub fn write_via_editor<E>(editor: &E, template: &str) -> Result<String, EditorError>
where
    E: EditorRunner + ?Sized,
{
    prompt_via_editor(editor, template).map(|text| remove_instructions(&text))
}

/// Open `card` in the editor and parse the result into an edited card.
pub fn edit_card<E>(editor: &E, card: &Card) -> Result<Card, CardEditError>
where
    E: EditorRunner + ?Sized,
{
    let original = card_template(card);
    let edited = prompt_via_editor(editor, &original)?;
    Ok(parse_card_edit(&original, &edited)?)
}
