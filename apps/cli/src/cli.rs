//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Create decks of flashcards quickly and study them from the terminal.
#[derive(Parser, Debug)]
#[command(name = "flashcards", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new deck and select it
    Create {
        /// Name of the deck (prompted for when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Description of the deck (prompted for when omitted)
        #[arg(long)]
        desc: Option<String>,
    },

    /// Select a deck; new cards are added to it and `study` opens it
    Select {
        /// Name of the deck
        deck: String,
    },

    /// List every deck
    List,

    /// Show the selected deck, if any, and details about it
    Status,

    /// Add a card to the selected deck
    Add {
        /// Write the question and answer in $EDITOR
        #[arg(short = 'e', long = "editor")]
        editor_mode: bool,

        #[arg(long)]
        question: Option<String>,

        #[arg(long)]
        answer: Option<String>,
    },

    /// Start a study session; cards are shuffled unless --ordered is given
    Study {
        /// Deck to study, or "all" for every deck; defaults to the selected deck
        deck: Option<String>,

        /// Study the cards in the order they were added to the deck
        #[arg(short, long)]
        ordered: bool,
    },

    /// Rename the selected deck
    Rename {
        /// New name of the deck
        new_name: String,
    },
}
