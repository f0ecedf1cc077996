//! Deck and card command tests.

mod common;

use pretty_assertions::assert_eq;
use std::fs;
use std::io::Cursor;

use common::fixtures;
use common::{capture, EditorAction, ScriptedEditor, TestContext};
use flashcard_core::Card;
use flashcards_cli::commands::{self, NewCard};

/// Test create writes the deck file and selects it.
#[test]
fn test_create_selects_new_deck() {
    let ctx = TestContext::new();

    let output = capture(|out| commands::create(&ctx.app, out, "French Verbs", "Irregulars"));

    assert_eq!(output, "Deck created!\n");
    let path = ctx.store().deck_path("French Verbs");
    assert!(path.ends_with("French_Verbs.json"));
    let deck = ctx.store().load_selected_deck().unwrap();
    assert_eq!(deck.name, "French Verbs");
    assert_eq!(deck.description, "Irregulars");
    assert_eq!(deck.path(), path);
    assert!(deck.is_empty());
}

/// Test create refuses to overwrite an existing deck file.
#[test]
fn test_create_existing_deck() {
    let ctx = TestContext::new();
    let deck = fixtures::math_deck(ctx.store());
    ctx.add_deck(&deck);
    let before = fs::read_to_string(deck.path()).unwrap();

    let output = capture(|out| commands::create(&ctx.app, out, "Basic-Math", ""));

    assert_eq!(output, "A deck named \"Basic-Math\" already exists.\n");
    assert_eq!(fs::read_to_string(deck.path()).unwrap(), before);
    assert!(ctx.store().load_selected_deck().is_err());
}

/// Test create rejects names with no usable characters.
#[test]
fn test_create_rejects_empty_stem() {
    let ctx = TestContext::new();
    let output = capture(|out| commands::create(&ctx.app, out, "?!", ""));
    assert_eq!(output, "A deck name needs at least one letter or digit.\n");
    assert!(ctx.store().deck_files().unwrap().is_empty());
}

/// Test select switches the selected deck.
#[test]
fn test_select_deck() {
    let ctx = TestContext::new();
    ctx.select_deck(&fixtures::math_deck(ctx.store()));
    ctx.add_deck(&fixtures::science_deck(ctx.store()));

    let output = capture(|out| commands::select(&ctx.app, out, "Science"));

    assert_eq!(
        output,
        "Selected deck: Science\nNew cards will be added to this deck.\n"
    );
    assert_eq!(ctx.store().load_selected_deck().unwrap().name, "Science");
}

/// Test select with an unknown name keeps the previous selection.
#[test]
fn test_select_unknown_deck() {
    let ctx = TestContext::new();
    ctx.select_deck(&fixtures::math_deck(ctx.store()));

    let output = capture(|out| commands::select(&ctx.app, out, "Nope"));

    assert_eq!(output, "No deck by that name found.\n");
    assert_eq!(ctx.store().load_selected_deck().unwrap().name, "Basic Math");
}

/// Test status without a selected deck.
#[test]
fn test_status_without_selection() {
    let ctx = TestContext::new();
    let output = capture(|out| commands::status(&ctx.app, out));
    assert_eq!(output, "No deck currently selected.\n");
}

/// Test status describes the selected deck.
#[test]
fn test_status_with_selection() {
    let ctx = TestContext::new();
    ctx.select_deck(&fixtures::math_deck(ctx.store()));

    let output = capture(|out| commands::status(&ctx.app, out));

    assert_eq!(
        output,
        "\nCurrently selected deck: Basic Math\nNumber of cards: 4\nDescription: Simple arithmetic\n\n"
    );
}

/// Test list marks the selected deck and reports unreadable files.
#[test]
fn test_list_decks() {
    let ctx = TestContext::new();
    ctx.add_deck(&fixtures::math_deck(ctx.store()));
    ctx.select_deck(&fixtures::science_deck(ctx.store()));
    fs::write(ctx.store().root().join("Broken.json"), "{}").unwrap();

    let output = capture(|out| commands::list(&ctx.app, out));
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "  Basic Math (4 cards)");
    assert!(lines[1].starts_with("  "));
    assert!(lines[1].contains("Broken.json (unreadable: "));
    assert!(lines[1].contains("'name'"));
    assert_eq!(lines[2], "* Science (2 cards)");
}

/// Test list with no decks.
#[test]
fn test_list_empty() {
    let ctx = TestContext::new();
    let output = capture(|out| commands::list(&ctx.app, out));
    assert_eq!(output, "No decks yet. Create one with `flashcards create`.\n");
}

/// Test add appends to the selected deck.
#[test]
fn test_add_card_from_flags() {
    let ctx = TestContext::new();
    let deck = fixtures::science_deck(ctx.store());
    ctx.select_deck(&deck);

    let output = capture(|out| {
        commands::add(
            &ctx.app,
            &mut Cursor::new(""),
            out,
            NewCard {
                question: Some("O2 is?".into()),
                answer: Some("Oxygen".into()),
                editor_mode: false,
            },
        )
    });

    assert_eq!(output, "Card added to the deck!\n");
    let reloaded = ctx.reload(&deck);
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded.cards[2], Card::new("O2 is?", "Oxygen"));
}

/// Test add prompts for missing fields on standard input.
#[test]
fn test_add_card_from_prompts() {
    let ctx = TestContext::new();
    let deck = fixtures::science_deck(ctx.store());
    ctx.select_deck(&deck);

    let output = capture(|out| {
        commands::add(
            &ctx.app,
            &mut Cursor::new("He is?\nHelium\n"),
            out,
            NewCard::default(),
        )
    });

    assert_eq!(output, "Question: Answer: Card added to the deck!\n");
    assert_eq!(ctx.reload(&deck).cards[2], Card::new("He is?", "Helium"));
}

/// Test add collects both fields through the editor.
#[test]
fn test_add_card_in_editor_mode() {
    let ctx = TestContext::with_editor(ScriptedEditor::new([
        EditorAction::Replace("What is Rust?\n# Write your question above.\n".into()),
        EditorAction::Edit(|buffer| format!("A systems language.{buffer}")),
    ]));
    let deck = fixtures::science_deck(ctx.store());
    ctx.select_deck(&deck);

    let output = capture(|out| {
        commands::add(
            &ctx.app,
            &mut Cursor::new(""),
            out,
            NewCard {
                editor_mode: true,
                ..NewCard::default()
            },
        )
    });

    assert_eq!(output, "Card added to the deck!\n");
    assert_eq!(ctx.editor().times_opened(), 2);
    assert_eq!(
        ctx.reload(&deck).cards[2],
        Card::new("What is Rust?", "A systems language.")
    );
}

/// Test add rejects an empty question.
#[test]
fn test_add_rejects_empty_question() {
    let ctx = TestContext::with_editor(ScriptedEditor::new([EditorAction::Keep]));
    let deck = fixtures::science_deck(ctx.store());
    ctx.select_deck(&deck);

    let output = capture(|out| {
        commands::add(
            &ctx.app,
            &mut Cursor::new(""),
            out,
            NewCard {
                answer: Some("Anything".into()),
                editor_mode: true,
                ..NewCard::default()
            },
        )
    });

    assert_eq!(output, "The question cannot be empty; no card was added.\n");
    assert_eq!(ctx.reload(&deck), deck);
}

/// Test add without a selected deck.
#[test]
fn test_add_without_selection() {
    let ctx = TestContext::new();
    let output = capture(|out| {
        commands::add(&ctx.app, &mut Cursor::new(""), out, NewCard::default())
    });
    assert_eq!(
        output,
        "There is no deck currently selected. Select a deck to add a card.\n"
    );
}

/// Test rename moves the file and keeps the deck selected.
#[test]
fn test_rename_selected_deck() {
    let ctx = TestContext::new();
    let deck = fixtures::math_deck(ctx.store());
    ctx.select_deck(&deck);

    let output = capture(|out| commands::rename(&ctx.app, out, "Arithmetic"));

    assert_eq!(output, "Renamed \"Basic Math\" to \"Arithmetic\".\n");
    assert!(!deck.path().exists());
    let selected = ctx.store().load_selected_deck().unwrap();
    assert_eq!(selected.name, "Arithmetic");
    assert_eq!(selected.path(), ctx.store().deck_path("Arithmetic"));
    assert_eq!(selected.cards, deck.cards);
}

/// Test rename onto another deck's file is refused.
#[test]
fn test_rename_collision() {
    let ctx = TestContext::new();
    let deck = fixtures::math_deck(ctx.store());
    ctx.select_deck(&deck);
    ctx.add_deck(&fixtures::science_deck(ctx.store()));

    let output = capture(|out| commands::rename(&ctx.app, out, "Science"));

    assert_eq!(output, "A deck named \"Science\" already exists.\n");
    assert_eq!(ctx.reload(&deck), deck);
}

/// Test a selected deck that was corrupted on disk surfaces as an error.
#[test]
fn test_status_with_corrupt_selected_deck() {
    let ctx = TestContext::new();
    let deck = fixtures::math_deck(ctx.store());
    ctx.select_deck(&deck);
    fs::write(deck.path(), r#"{"name": "x", "description": "", "cards": "oops"}"#).unwrap();

    let mut out = Vec::new();
    let err = commands::status(&ctx.app, &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("'cards' value is not a list"));
}
