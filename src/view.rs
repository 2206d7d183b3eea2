// View module: pure functions from state to the text blocks printed in
// the terminal. Nothing here talks to the network or reads input, so
// every function can be checked by comparing strings.

use crate::api::Player;
use crate::controller::{FormDraft, ViewState};

/// Render the roster area for the current view state.
pub fn render(state: &ViewState) -> String {
    match state {
        ViewState::Roster(players) => roster(players),
        ViewState::Detail(player) => detail(player),
        ViewState::NotFound => not_found(),
    }
}

/// One card per player, in the order the server sent them. Each card
/// carries its own details and remove controls tagged with the id they
/// act on.
pub fn roster(players: &[Player]) -> String {
    let mut markup = format!("=== Puppy Bowl roster ({}) ===\n", players.len());
    if players.is_empty() {
        markup.push_str("\nThe roster is empty.\n");
        return markup;
    }
    for player in players {
        markup.push_str(&format!(
            "\n{}\n  breed: {}\n  photo: {}\n  [details #{id}]  [remove #{id}]\n",
            player.name,
            player.breed,
            player.image_url,
            id = player.id,
        ));
    }
    markup
}

/// The single-player card shown after a details click.
pub fn detail(player: &Player) -> String {
    format!(
        "=== Player details ===\n\nName: {}\nBreed: {}\nStatus: {}\nPhoto: {}\n\n[back]\n",
        player.name, player.breed, player.status, player.image_url,
    )
}

/// Shown when a lookup had nothing to show. The menu below the screen
/// is what offers the way back.
pub fn not_found() -> String {
    "No player found\n".to_string()
}

/// The add-a-player form with whatever the visitor has typed so far.
/// Rendering the same draft twice gives the same text, which is what
/// keeps the form area steady across roster updates.
pub fn form(draft: &FormDraft) -> String {
    format!(
        "=== Add a new player ===\n\n  name  (required): {}\n  breed (required): {}\n\n  [add player]\n",
        draft.name, draft.breed,
    )
}
