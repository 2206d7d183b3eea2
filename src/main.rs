// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, create an API client, hand it
//   to the UI loop.
// - Returns `anyhow::Result` to simplify error handling at the top.

use puppybowl_cli::{api::ApiClient, controller::RosterController, ui};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays free for the rendered
    // screen. `RUST_LOG` overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Create an API client configured by `PUPPY_BOWL_API_URL` and
    // `PUPPY_BOWL_COHORT`, or default to the hosted API. See
    // `api::ApiClient::from_env`.
    let api = ApiClient::from_env()?;

    // Start the interactive loop. This call blocks until the user quits.
    ui::run(RosterController::new(api))?;
    Ok(())
}
