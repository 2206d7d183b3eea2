// UI layer: the interactive terminal loop, built on `dialoguer`.
// Each pass clears the screen, prints the roster area and the form area
// from the controller's current state, then offers one menu whose
// entries stand in for the buttons on the original page. Actions go
// through the controller; nothing in here touches the network directly.

use crate::api::RosterApi;
use crate::controller::{RosterController, ViewState};
use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

/// Run the interactive loop until the user chooses "Quit".
///
/// Note: `Select::interact()` is keyboard-driven: you can use arrow keys
/// and Enter to choose an option.
pub fn run<A: RosterApi>(mut controller: RosterController<A>) -> Result<()> {
    with_spinner("Fetching the roster...", || controller.refresh());
    loop {
        redraw(&controller)?;
        if !dispatch(&mut controller)? {
            break;
        }
    }
    Ok(())
}

/// Repaint both screen areas from scratch. The whole screen is replaced
/// on every pass, so stale cards can never linger.
fn redraw<A: RosterApi>(controller: &RosterController<A>) -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    println!("{}", controller.roster_markup());
    println!("{}", controller.form_markup());
    Ok(())
}

/// Show the menu for the current view and run the chosen action.
/// Returns false when the user chose to quit.
fn dispatch<A: RosterApi>(controller: &mut RosterController<A>) -> Result<bool> {
    // Snapshot the card labels first so the borrow of the view state
    // ends before any action mutates the controller.
    let cards: Option<Vec<(String, String)>> = match controller.view() {
        ViewState::Roster(players) => Some(
            players
                .iter()
                .map(|p| (format!("{} ({}) #{}", p.name, p.breed, p.id), p.id.to_string()))
                .collect(),
        ),
        _ => None,
    };

    let Some(cards) = cards else {
        // Detail and not-found screens only offer the way back.
        let items = vec!["Back to the roster", "Quit"];
        return Ok(match Select::new().items(&items).default(0).interact()? {
            0 => {
                with_spinner("Fetching the roster...", || controller.back());
                true
            }
            _ => false,
        });
    };

    let items = vec![
        "See player details",
        "Look up a player by id",
        "Remove a player",
        "Add a new player",
        "Refresh the roster",
        "Quit",
    ];
    match Select::new().items(&items).default(0).interact()? {
        0 => {
            if let Some(id) = pick_player(&cards)? {
                with_spinner("Fetching the player...", || controller.show_details(&id));
            }
        }
        1 => {
            // An empty answer is allowed; looking up nothing lands on
            // the not-found screen.
            let id: String = Input::new()
                .with_prompt("Player id")
                .allow_empty(true)
                .interact_text()?;
            with_spinner("Fetching the player...", || controller.show_details(&id));
        }
        2 => {
            if let Some(id) = pick_player(&cards)? {
                with_spinner("Removing the player...", || controller.remove(&id));
            }
        }
        3 => handle_add(controller)?,
        4 => with_spinner("Fetching the roster...", || controller.refresh()),
        _ => return Ok(false),
    }
    Ok(true)
}

/// Let the user pick one of the cards currently on screen. Returns the
/// id the card's controls are tagged with.
fn pick_player(cards: &[(String, String)]) -> Result<Option<String>> {
    if cards.is_empty() {
        return Ok(None);
    }
    let labels: Vec<&str> = cards.iter().map(|(label, _)| label.as_str()).collect();
    let chosen = Select::new()
        .with_prompt("Which player?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Some(cards[chosen].1.clone()))
}

/// Collect the form fields and submit. The prompts are prefilled with
/// the current draft, so a failed submit leaves everything typed in
/// place for the next attempt. Both fields are required; empty answers
/// re-prompt.
fn handle_add<A: RosterApi>(controller: &mut RosterController<A>) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Name")
        .with_initial_text(controller.form().name.clone())
        .interact_text()?;
    let breed: String = Input::new()
        .with_prompt("Breed")
        .with_initial_text(controller.form().breed.clone())
        .interact_text()?;
    controller.fill_form(name, breed);
    with_spinner("Adding the player...", || controller.submit());
    Ok(())
}

/// Run `action` behind a spinner so slow calls do not look like a hang.
fn with_spinner<T>(message: &str, action: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = action();
    spinner.finish_and_clear();
    out
}
