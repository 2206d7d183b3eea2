use super::*;

use std::cell::RefCell;

use serde_json::json;

use crate::api::PlayerId;

enum ListFailure {
    Shape,
    Transport,
}

/// Scripted roster used to drive the controller without a server.
/// Mutations go through `RefCell` so tests can reprogram behavior
/// between calls through `controller.api`.
struct FakeRoster {
    players: RefCell<Vec<Player>>,
    list_failure: RefCell<Option<ListFailure>>,
    fetch_fails: RefCell<bool>,
    delete_accepts: RefCell<bool>,
    delete_fails: RefCell<bool>,
    create_body: RefCell<Value>,
    create_fails: RefCell<bool>,
    list_calls: RefCell<usize>,
    fetch_calls: RefCell<usize>,
}

impl FakeRoster {
    fn with_players(players: Vec<Player>) -> Self {
        FakeRoster {
            players: RefCell::new(players),
            list_failure: RefCell::new(None),
            fetch_fails: RefCell::new(false),
            delete_accepts: RefCell::new(true),
            delete_fails: RefCell::new(false),
            create_body: RefCell::new(json!({"success": true})),
            create_fails: RefCell::new(false),
            list_calls: RefCell::new(0),
            fetch_calls: RefCell::new(0),
        }
    }
}

/// A real decode failure, for the wrong-shape path.
fn shape_error() -> ApiError {
    let source =
        serde_json::from_value::<Vec<Player>>(json!("not players")).expect_err("shape source");
    ApiError::UnexpectedShape {
        url: "http://stub/players".to_string(),
        source,
    }
}

/// A real connection failure, built by dialing a loopback port that was
/// just released.
fn transport_error() -> ApiError {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("probe port");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    let url = format!("http://{addr}/players");
    let source = reqwest::blocking::Client::new()
        .get(&url)
        .send()
        .expect_err("refused connection");
    ApiError::Transport { url, source }
}

impl RosterApi for FakeRoster {
    fn list_players(&self) -> Result<Vec<Player>, ApiError> {
        *self.list_calls.borrow_mut() += 1;
        match *self.list_failure.borrow() {
            Some(ListFailure::Shape) => Err(shape_error()),
            Some(ListFailure::Transport) => Err(transport_error()),
            None => Ok(self.players.borrow().clone()),
        }
    }

    fn fetch_player(&self, id: &str) -> Result<Player, ApiError> {
        *self.fetch_calls.borrow_mut() += 1;
        if id.is_empty() {
            return Err(ApiError::EmptyPlayerId);
        }
        if *self.fetch_fails.borrow() {
            return Err(shape_error());
        }
        self.players
            .borrow()
            .iter()
            .find(|p| p.id.as_str() == id)
            .cloned()
            .ok_or_else(shape_error)
    }

    fn create_player(&self, player: &NewPlayer) -> Result<Value, ApiError> {
        if *self.create_fails.borrow() {
            return Err(transport_error());
        }
        let body = self.create_body.borrow().clone();
        if !body.is_null() {
            let id = PlayerId((self.players.borrow().len() + 1).to_string());
            self.players.borrow_mut().push(Player {
                id,
                name: player.name.clone(),
                breed: player.breed.clone(),
                status: "bench".to_string(),
                image_url: String::new(),
            });
        }
        Ok(body)
    }

    fn delete_player(&self, id: &str) -> Result<bool, ApiError> {
        if *self.delete_fails.borrow() {
            return Err(transport_error());
        }
        if !*self.delete_accepts.borrow() {
            return Ok(false);
        }
        self.players.borrow_mut().retain(|p| p.id.as_str() != id);
        Ok(true)
    }
}

fn player(id: &str, name: &str, breed: &str) -> Player {
    Player {
        id: PlayerId(id.to_string()),
        name: name.to_string(),
        breed: breed.to_string(),
        status: "bench".to_string(),
        image_url: format!("{}.png", name.to_lowercase()),
    }
}

fn controller_with(players: Vec<Player>) -> RosterController<FakeRoster> {
    RosterController::new(FakeRoster::with_players(players))
}

fn roster_len(controller: &RosterController<FakeRoster>) -> usize {
    match controller.view() {
        ViewState::Roster(players) => players.len(),
        other => panic!("expected a roster view, got {other:?}"),
    }
}

#[test]
fn refresh_shows_every_fetched_player_as_a_card() {
    let mut controller = controller_with(vec![player("1", "Rex", "Lab")]);
    controller.refresh();

    assert_eq!(roster_len(&controller), 1);
    let markup = controller.roster_markup();
    assert!(markup.contains("Rex"));
    assert!(markup.contains("breed: Lab"));
    assert!(markup.contains("[details #1]"));
    assert!(markup.contains("[remove #1]"));
}

#[test]
fn wrong_shape_roster_payload_keeps_the_current_view() {
    let mut controller = controller_with(vec![
        player("1", "Rex", "Lab"),
        player("2", "Daisy", "Corgi"),
    ]);
    controller.refresh();
    assert_eq!(roster_len(&controller), 2);

    *controller.api.list_failure.borrow_mut() = Some(ListFailure::Shape);
    controller.refresh();
    assert_eq!(roster_len(&controller), 2);
}

#[test]
fn unreachable_server_shows_an_empty_roster() {
    let mut controller = controller_with(vec![player("1", "Rex", "Lab")]);
    controller.refresh();
    assert_eq!(roster_len(&controller), 1);

    *controller.api.list_failure.borrow_mut() = Some(ListFailure::Transport);
    controller.refresh();
    assert_eq!(roster_len(&controller), 0);
    assert!(controller.roster_markup().contains("The roster is empty."));
}

#[test]
fn empty_id_lookup_lands_on_not_found_without_a_fetch() {
    let mut controller = controller_with(vec![player("1", "Rex", "Lab")]);
    controller.show_details("");

    assert_eq!(*controller.view(), ViewState::NotFound);
    assert_eq!(*controller.api.fetch_calls.borrow(), 0);
    assert!(controller.roster_markup().contains("No player found"));
}

#[test]
fn details_shows_the_fetched_player_card() {
    let mut controller = controller_with(vec![
        player("1", "Rex", "Lab"),
        player("2", "Daisy", "Corgi"),
    ]);
    controller.refresh();
    controller.show_details("2");

    match controller.view() {
        ViewState::Detail(p) => assert_eq!(p.name, "Daisy"),
        other => panic!("expected a detail view, got {other:?}"),
    }
    let markup = controller.roster_markup();
    assert!(markup.contains("Name: Daisy"));
    assert!(markup.contains("Status: bench"));
}

#[test]
fn failed_player_fetch_leaves_the_view_alone() {
    let mut controller = controller_with(vec![player("1", "Rex", "Lab")]);
    controller.refresh();

    *controller.api.fetch_fails.borrow_mut() = true;
    controller.show_details("1");
    assert_eq!(roster_len(&controller), 1);
}

#[test]
fn back_returns_to_a_freshly_fetched_roster() {
    let mut controller = controller_with(vec![player("1", "Rex", "Lab")]);
    controller.refresh();
    controller.show_details("1");

    controller.api.players.borrow_mut().push(player("2", "Daisy", "Corgi"));
    controller.back();
    assert_eq!(roster_len(&controller), 2);
}

#[test]
fn removing_a_player_refreshes_the_roster_without_it() {
    let mut controller = controller_with(vec![
        player("1", "Rex", "Lab"),
        player("2", "Daisy", "Corgi"),
    ]);
    controller.refresh();
    controller.remove("1");

    assert_eq!(roster_len(&controller), 1);
    let markup = controller.roster_markup();
    assert!(!markup.contains("#1]"));
    assert!(markup.contains("[details #2]"));
    assert_eq!(*controller.api.list_calls.borrow(), 2);
}

#[test]
fn declined_delete_changes_nothing_on_screen() {
    let mut controller = controller_with(vec![player("1", "Rex", "Lab")]);
    controller.refresh();

    *controller.api.delete_accepts.borrow_mut() = false;
    controller.remove("1");
    assert_eq!(roster_len(&controller), 1);
    assert_eq!(*controller.api.list_calls.borrow(), 1);
}

#[test]
fn failed_delete_changes_nothing_on_screen() {
    let mut controller = controller_with(vec![player("1", "Rex", "Lab")]);
    controller.refresh();

    *controller.api.delete_fails.borrow_mut() = true;
    controller.remove("1");
    assert_eq!(roster_len(&controller), 1);
    assert_eq!(*controller.api.list_calls.borrow(), 1);
}

#[test]
fn accepted_submit_clears_the_form_and_shows_the_new_card() {
    let mut controller = controller_with(Vec::new());
    controller.refresh();

    controller.fill_form("Fido".to_string(), "Poodle".to_string());
    assert!(controller.form_markup().contains("Fido"));

    controller.submit();
    assert_eq!(*controller.form(), FormDraft::default());
    let markup = controller.roster_markup();
    assert!(markup.contains("Fido"));
    assert!(markup.contains("breed: Poodle"));
}

#[test]
fn null_create_response_keeps_the_draft_and_the_view() {
    let mut controller = controller_with(Vec::new());
    controller.refresh();

    *controller.api.create_body.borrow_mut() = Value::Null;
    controller.fill_form("Fido".to_string(), "Poodle".to_string());
    controller.submit();

    assert_eq!(controller.form().name, "Fido");
    assert_eq!(controller.form().breed, "Poodle");
    assert_eq!(*controller.api.list_calls.borrow(), 1);
}

#[test]
fn failed_create_keeps_the_draft_as_typed() {
    let mut controller = controller_with(Vec::new());
    *controller.api.create_fails.borrow_mut() = true;

    controller.fill_form("Fido".to_string(), "Poodle".to_string());
    controller.submit();

    assert_eq!(controller.form().name, "Fido");
    assert_eq!(controller.form().breed, "Poodle");
    assert!(controller.form_markup().contains("Fido"));
}

#[test]
fn stale_navigation_results_lose_to_newer_ones() {
    let mut controller = controller_with(vec![player("1", "Rex", "Lab")]);
    controller.refresh();

    let stale = controller.begin_navigation();
    let newer = controller.begin_navigation();

    assert!(!controller.apply_view(stale, ViewState::NotFound));
    assert_eq!(roster_len(&controller), 1);

    assert!(controller.apply_view(newer, ViewState::NotFound));
    assert_eq!(*controller.view(), ViewState::NotFound);
}
