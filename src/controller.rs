// Controller module: owns the state behind the two screen areas (the
// roster area and the add-a-player form) and drives every transition
// through the API client. Rendering stays in `view`; input stays in
// `ui`; this module is where "what happens on a click" lives.
//
// Failures never escape to the caller. A failed call is logged and the
// screen degrades the same way the original site did: a roster that
// cannot be fetched shows up empty, while a payload of the wrong shape
// leaves whatever was already on screen alone.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, NewPlayer, Player, RosterApi};
use crate::view;

/// What the roster area is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// The list of cards, one per player. An empty list is a valid
    /// roster and renders as such.
    Roster(Vec<Player>),
    /// A single player's card after a details click.
    Detail(Player),
    /// The screen for a lookup that had nothing to show.
    NotFound,
}

/// What the visitor has typed into the add-a-player form. The draft
/// survives a failed submit so nothing has to be typed twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub name: String,
    pub breed: String,
}

/// The controller proper. Generic over the API so tests can drive it
/// with a scripted fake.
pub struct RosterController<A> {
    api: A,
    view: ViewState,
    form: FormDraft,
    generation: u64,
}

impl<A: RosterApi> RosterController<A> {
    /// Start on an empty roster. The first `refresh` fills it in.
    pub fn new(api: A) -> Self {
        RosterController {
            api,
            view: ViewState::Roster(Vec::new()),
            form: FormDraft::default(),
            generation: 0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn form(&self) -> &FormDraft {
        &self.form
    }

    /// Text for the roster area under the current view state.
    pub fn roster_markup(&self) -> String {
        view::render(&self.view)
    }

    /// Text for the form area under the current draft.
    pub fn form_markup(&self) -> String {
        view::form(&self.form)
    }

    /// Stamp the start of a navigation. Any result carrying an older
    /// stamp loses to whatever was started after it.
    fn begin_navigation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Install `next` as the roster area, unless a newer navigation has
    /// started since `issued` was stamped. Returns whether the view
    /// changed.
    fn apply_view(&mut self, issued: u64, next: ViewState) -> bool {
        if issued != self.generation {
            debug!(issued, current = self.generation, "dropping stale view result");
            return false;
        }
        self.view = next;
        true
    }

    /// Fetch the roster and show it. On a transport or body failure the
    /// roster shows empty; on a wrong-shape payload the current view
    /// stays up.
    pub fn refresh(&mut self) {
        let issued = self.begin_navigation();
        match self.api.list_players() {
            Ok(players) => {
                debug!(count = players.len(), "fetched the roster");
                self.apply_view(issued, ViewState::Roster(players));
            }
            Err(err @ ApiError::UnexpectedShape { .. }) => {
                error!(%err, "roster payload is not a player list, keeping the current view");
            }
            Err(err) => {
                error!(%err, "trouble fetching the roster, showing it empty");
                self.apply_view(issued, ViewState::Roster(Vec::new()));
            }
        }
    }

    /// Show one player's card. An empty id goes straight to the
    /// not-found screen without a network call; a failed fetch leaves
    /// the current view alone.
    pub fn show_details(&mut self, id: &str) {
        let issued = self.begin_navigation();
        if id.is_empty() {
            self.apply_view(issued, ViewState::NotFound);
            return;
        }
        match self.api.fetch_player(id) {
            Ok(player) => {
                self.apply_view(issued, ViewState::Detail(player));
            }
            Err(err) => {
                error!(player_id = id, %err, "trouble fetching the player");
            }
        }
    }

    /// Remove a player, then re-fetch the roster so the card disappears.
    /// A declined or failed delete changes nothing on screen.
    pub fn remove(&mut self, id: &str) {
        match self.api.delete_player(id) {
            Ok(true) => {
                info!(player_id = id, "player removed from the roster");
                self.refresh();
            }
            Ok(false) => {
                warn!(player_id = id, "server declined to remove the player");
            }
            Err(err) => {
                error!(player_id = id, %err, "trouble removing the player");
            }
        }
    }

    /// Record what the visitor typed into the form.
    pub fn fill_form(&mut self, name: String, breed: String) {
        self.form.name = name;
        self.form.breed = breed;
    }

    /// Submit the draft. On acceptance the form clears and the roster
    /// re-fetches so the new card shows up; otherwise the draft stays
    /// as typed.
    pub fn submit(&mut self) {
        let payload = NewPlayer {
            name: self.form.name.clone(),
            breed: self.form.breed.clone(),
        };
        match self.api.create_player(&payload) {
            Ok(Value::Null) => {
                warn!("create answered with an empty body, keeping the form as typed");
            }
            Ok(body) => {
                info!(name = %payload.name, breed = %payload.breed, "new player added");
                debug!(%body, "create response body");
                self.form = FormDraft::default();
                self.refresh();
            }
            Err(err) => {
                error!(%err, "trouble adding the player, keeping the form as typed");
            }
        }
    }

    /// Leave a detail or not-found screen for a fresh roster.
    pub fn back(&mut self) {
        self.refresh();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
