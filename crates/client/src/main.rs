//! Borderline game client binary.
//!
//! Composition root: loads configuration, installs logging, spawns the
//! remote link, and hands control to the selected frontend.
//!
//! ```bash
//! # Terminal client against a local server, with a replay file for `o`
//! BORDERLINE_SERVER_URL=ws://127.0.0.1:5000/ws cargo run -p borderline-client -- game.json
//! ```

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli().await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli, ...)");
    }

    Ok(())
}

/// Run the CLI frontend.
#[cfg(feature = "frontend-cli")]
async fn run_cli() -> Result<()> {
    use borderline_client::Client;
    use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
    use client_remote::{RemoteConfig, RemoteLink};

    // 1. Load configuration from environment (and the optional replay path)
    let remote_config = RemoteConfig::from_env();
    let frontend_config = FrontendConfig::from_env();
    let mut cli_config = CliConfig::from_env();
    if let Some(path) = std::env::args_os().nth(1) {
        cli_config = cli_config.with_replay_file(path);
    }

    // 2. Setup logging; the guard flushes the file on exit
    let _log_guard = logging::setup_logging(cli_config.session_id.as_deref())?;

    tracing::info!("Starting Borderline client");
    tracing::info!("Server: {}", remote_config.url);
    tracing::info!("Game mode: {}", cli_config.game.mode);

    // 3. Spawn the remote link (connects and reconnects in the background)
    let link = RemoteLink::spawn(remote_config);

    // 4. Build the frontend on the link's handle
    let frontend = CliFrontend::new(frontend_config, cli_config, link.handle());

    // 5. Assemble and run
    let client = Client::builder().link(link).frontend(frontend).build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
