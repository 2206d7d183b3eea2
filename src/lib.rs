// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive roster
// client.
//
// Module responsibilities:
// - `api`: Encapsulates HTTP interactions with the Puppy Bowl server
//   (list, fetch, create, delete) behind the `RosterApi` trait.
// - `controller`: Owns the view state and the form draft and decides
//   what each user action does to them.
// - `view`: Pure rendering from state to the text printed on screen.
// - `ui`: Implements the terminal loop and delegates every action to
//   the controller.
//
// Keeping this separation makes it easier to test the state handling
// without a terminal or a live server.
pub mod api;
pub mod controller;
pub mod ui;
pub mod view;
