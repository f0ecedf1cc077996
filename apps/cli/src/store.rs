//! Deck files on disk and the selected-deck pointer.

use flashcard_core::{derive_filename, Card, CorruptDeck, Deck, DECK_EXTENSION};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reserved file inside the storage root that records the selected deck.
pub const SELECTED_DECK_NAME: &str = ".SELECTEDDECK";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no deck found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("a deck already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("corrupt deck {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: CorruptDeck,
    },

    #[error("the card is no longer in {}", path.display())]
    CardNotFound { path: PathBuf },

    #[error("cannot encode deck {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot record path {} as the selected deck", .0.display())]
    UnencodablePath(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

type Result<T> = std::result::Result<T, StoreError>;

fn io_error(path: &Path, source: io::Error) -> StoreError {
    if source.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(path.to_path_buf())
    } else {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Write `bytes` next to `path` and rename over it, so readers see either the
/// old content or the new content.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut staged = tempfile::Builder::new()
        .prefix(".staged")
        .suffix(".tmp")
        .tempfile_in(parent_dir(path))
        .map_err(|e| io_error(path, e))?;
    staged
        .write_all(bytes)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| io_error(path, e))?;
    staged
        .persist(path)
        .map_err(|e| io_error(path, e.error))?;
    Ok(())
}

/// Remove the file at `path` when `result` failed, then hand `result` back.
fn remove_on_failure(path: &Path, result: Result<()>) -> Result<()> {
    if result.is_err() {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "cannot remove unfinished deck file");
        }
    }
    result
}

#[cfg(unix)]
fn encode_pointer(path: &Path) -> Result<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;
    Ok(path.as_os_str().as_bytes().to_vec())
}

#[cfg(unix)]
fn decode_pointer(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn encode_pointer(path: &Path) -> Result<Vec<u8>> {
    path.to_str()
        .map(|text| text.as_bytes().to_vec())
        .ok_or_else(|| StoreError::UnencodablePath(path.to_path_buf()))
}

#[cfg(not(unix))]
fn decode_pointer(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// File-backed deck storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct DeckStore {
    root: PathBuf,
}

impl DeckStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fresh, unsaved deck whose file would live in this store.
    pub fn new_deck(&self, name: impl Into<String>, description: Option<String>) -> Deck {
        Deck::new(name, description, &self.root)
    }

    /// Where the deck called `name` is stored.
    pub fn deck_path(&self, name: &str) -> PathBuf {
        self.root.join(derive_filename(name))
    }

    pub fn selected_deck_path(&self) -> PathBuf {
        self.root.join(SELECTED_DECK_NAME)
    }

    /// Create an empty file for `deck`, refusing to touch an existing entry.
    pub fn create_file(&self, deck: &Deck) -> Result<()> {
        let path = deck.path();
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.to_path_buf()),
                _ => io_error(path, e),
            })?;
        debug!(path = %path.display(), "created deck file");
        Ok(())
    }

    /// Create the deck file and write the deck into it. A failed write
    /// removes the new file again.
    pub fn create(&self, deck: &Deck) -> Result<()> {
        self.create_file(deck)?;
        remove_on_failure(deck.path(), self.save(deck))
    }

    /// Overwrite the deck's file with its current content.
    pub fn save(&self, deck: &Deck) -> Result<()> {
        let path = deck.path();
        let bytes = deck.to_json().map_err(|source| StoreError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        replace_file(path, &bytes)?;
        debug!(path = %path.display(), cards = deck.len(), "saved deck");
        Ok(())
    }

    /// Load the deck stored at `path`, keeping `path` as its file identity.
    pub fn load(&self, path: &Path) -> Result<Deck> {
        let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        Deck::from_json(&content, path.to_path_buf()).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Every deck file in the store, sorted by filename.
    pub fn deck_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.root, e)),
        };

        let extension = DECK_EXTENSION.trim_start_matches('.');
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error(&self.root, e))?.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == extension) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Load every deck in the store; the first unreadable deck aborts.
    pub fn load_all(&self) -> Result<Vec<Deck>> {
        self.deck_files()?
            .iter()
            .map(|path| self.load(path))
            .collect()
    }

    /// Point the selected-deck record at `path`, replacing any previous one.
    pub fn link_selected_deck(&self, path: &Path) -> Result<()> {
        let pointer = self.selected_deck_path();
        let target = encode_pointer(path)?;

        if let Err(e) = replace_file(&pointer, &target) {
            warn!(error = %e, "retrying selected deck update");
            replace_file(&pointer, &target)?;
        }
        info!(deck = %path.display(), "selected deck");
        Ok(())
    }

    /// Path recorded by the selected-deck pointer.
    pub fn selected_deck_file(&self) -> Result<PathBuf> {
        let pointer = self.selected_deck_path();
        let mut target = fs::read(&pointer).map_err(|e| io_error(&pointer, e))?;
        while matches!(target.last(), Some(b'\r' | b'\n')) {
            target.pop();
        }
        if target.is_empty() {
            return Err(StoreError::NotFound(pointer));
        }
        Ok(decode_pointer(&target))
    }

    pub fn load_selected_deck(&self) -> Result<Deck> {
        let path = self.selected_deck_file()?;
        self.load(&path)
    }

    /// Rename a deck and move its file to the path derived from the new name.
    ///
    /// The selected-deck pointer follows the file when it referenced it.
    pub fn rename(&self, deck: &mut Deck, new_name: impl Into<String>) -> Result<()> {
        let mut renamed = deck.clone();
        let old_path = renamed.rename(new_name);
        let moved = renamed.path() != old_path;

        if moved {
            self.create_file(&renamed)?;
            remove_on_failure(renamed.path(), self.save(&renamed))?;
            fs::remove_file(&old_path).map_err(|e| io_error(&old_path, e))?;

            if matches!(self.selected_deck_file(), Ok(selected) if selected == old_path) {
                self.link_selected_deck(renamed.path())?;
            }
        } else {
            self.save(&renamed)?;
        }

        info!(
            from = %old_path.display(),
            to = %renamed.path().display(),
            "renamed deck"
        );
        *deck = renamed;
        Ok(())
    }

    /// Reload the deck at `path`, overwrite the first card equal to `before`
    /// with `after`, and save.
    pub fn replace_card(&self, path: &Path, before: &Card, after: Card) -> Result<Deck> {
        let mut deck = self.load(path)?;
        let index = deck
            .position_of(before)
            .ok_or_else(|| StoreError::CardNotFound {
                path: path.to_path_buf(),
            })?;
        deck.cards[index] = after;
        self.save(&deck)?;
        info!(deck = %deck.name, index, "updated card");
        Ok(deck)
    }
}
