//! Glue code tying the remote link, the session, and the terminal UI together.
use anyhow::Result;
use async_trait::async_trait;
use client_frontend_core::{EventConsumer, FrontendApp, FrontendConfig, Session, ViewModel};
use client_remote::RemoteHandle;

use crate::config::CliConfig;
use crate::event::EventLoop;
use crate::ports::{CliScheduler, LinkSink};
use crate::presentation::terminal;

/// Terminal frontend. Talks to the remote authority only through the
/// [`RemoteHandle`]; the link itself is owned by the caller.
pub struct CliFrontend {
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
    handle: RemoteHandle,
}

impl CliFrontend {
    pub fn new(frontend_config: FrontendConfig, cli_config: CliConfig, handle: RemoteHandle) -> Self {
        Self {
            frontend_config,
            cli_config,
            handle,
        }
    }

    pub async fn execute(self) -> Result<()> {
        tracing::info!("CLI client starting...");

        let CliFrontend {
            frontend_config,
            cli_config,
            handle,
        } = self;

        let (scheduler, timer_rx) = CliScheduler::new();
        let session = Session::new(
            &frontend_config,
            ViewModel::new(),
            LinkSink::new(handle.clone()),
            scheduler,
        );

        // Subscribe before the terminal takes over so no link event is missed.
        let event_loop = EventLoop::new(session, handle, timer_rx, cli_config);

        let (mut terminal, guard) = terminal::init()?;
        let result = event_loop.run(&mut terminal).await;
        guard.restore()?;

        let session = result?;
        tracing::info!(
            notifications = session.message_log().len(),
            "CLI client exiting"
        );

        Ok(())
    }
}

#[async_trait]
impl FrontendApp for CliFrontend {
    async fn run(self) -> Result<()> {
        self.execute().await
    }
}
