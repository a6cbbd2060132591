mod action;
mod app;
mod app_state;
mod component;
mod components;
mod session;
mod theme;
mod widgets;

use tokio::sync::mpsc;

use aria_proto::client::ApiClient;
use aria_proto::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = aria_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("aria.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress
    // noisy connection-level DEBUG from HTTP client internals.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("aria log: {}", log_path.display());

    tracing::info!("aria starting…");

    let config = Config::load().unwrap_or_default();
    tracing::info!("backend: {}", config.backend.base_url);

    let client = ApiClient::new(config.backend.base_url.clone());

    let (session_tx, session_rx) = mpsc::channel::<session::SessionEvent>(256);
    let session = session::Session::new(client, session_tx);

    let app = app::App::new(session);
    app.run(session_rx, config.polling.now_playing_interval_ms)
        .await?;

    Ok(())
}
