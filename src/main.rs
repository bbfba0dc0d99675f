use color_eyre::eyre::{eyre, Result};
use std::env;
use team_mood::api;
use team_mood::dashboard;
use team_mood::mood_store::MoodStore;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    color_eyre::install()?;

    match env::args().nth(1).as_deref() {
        Some("serve") => run_server(),
        Some("dashboard") | None => run_dashboard(),
        Some(other) => Err(eyre!(
            "unknown mode `{other}`, expected `serve` or `dashboard`"
        )),
    }
}

fn run_server() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = env::var("MOODS_FILE").unwrap_or_else(|_| "moods.json".to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8000);

    let state = api::AppState::new(MoodStore::new(data_path));

    tokio::runtime::Runtime::new()?.block_on(api::serve(port, state))
}

fn run_dashboard() -> Result<()> {
    let base_url =
        env::var("MOOD_BACKEND_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

    let client = dashboard::ApiClient::new(base_url)?;
    dashboard::run(client)
}
