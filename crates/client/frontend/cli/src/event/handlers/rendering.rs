//! Rendering handlers.

use anyhow::Result;
use client_frontend_core::EventConsumer;

use super::super::EventLoop;
use crate::presentation::{terminal::Tui, ui};

impl EventLoop {
    /// Redraws only when the view model or the local UI state changed.
    pub(in crate::event) fn render_if_dirty(&mut self, terminal: &mut Tui) -> Result<()> {
        if self.session.presenter_mut().take_scope().is_empty() {
            return Ok(());
        }
        self.render(terminal)
    }

    pub(in crate::event) fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let ctx = ui::RenderContext {
            view_model: self.session.presenter(),
            messages: self.session.message_log(),
            app_state: &self.app_state,
            replay: self.session.replay(),
            message_panel_height: self.cli_config.ui.message_panel_height,
        };

        ui::render_with_view_model(terminal, &ctx)
    }
}
