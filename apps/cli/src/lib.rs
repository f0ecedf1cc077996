//! Command-line flashcard manager.
//!
//! Decks are JSON files in one storage directory; a pointer file records the
//! selected deck. Study sessions run in the terminal and can hand the current
//! card to `$EDITOR`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod editor;
pub mod store;
pub mod study;

use clap::Parser;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::commands::{prompt, App, NewCard};
use crate::config::{ensure_storage_directory, Config};
use crate::console::TerminalConsole;
use crate::editor::SystemEditor;
use crate::store::DeckStore;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    ensure_storage_directory(&config.storage_root)?;
    tracing::debug!(root = %config.storage_root.display(), editor = %config.editor, "configured");

    let app = App::new(
        DeckStore::new(&config.storage_root),
        SystemEditor::new(&config.editor),
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Create { name, desc } => {
            let name = match name {
                Some(name) => name,
                None => prompt(&mut input, &mut out, "Name of the deck")?,
            };
            let desc = match desc {
                Some(desc) => desc,
                None => prompt(&mut input, &mut out, "Description of the deck")?,
            };
            commands::create(&app, &mut out, &name, &desc)
        }
        Command::Select { deck } => commands::select(&app, &mut out, &deck),
        Command::List => commands::list(&app, &mut out),
        Command::Status => commands::status(&app, &mut out),
        Command::Add {
            editor_mode,
            question,
            answer,
        } => commands::add(
            &app,
            &mut input,
            &mut out,
            NewCard {
                question,
                answer,
                editor_mode,
            },
        ),
        Command::Study { deck, ordered } => {
            // The session writes through its own console handle.
            drop(out);
            commands::study(
                &app,
                &mut TerminalConsole,
                deck.as_deref(),
                ordered,
                &mut rand::thread_rng(),
            )
            .map(|_| ())
        }
        Command::Rename { new_name } => commands::rename(&app, &mut out, &new_name),
    }
}
