//! UI rendering entry point composing every widget into one frame.
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::{
    presentation::{terminal::Tui, theme::RatatuiTheme, widgets},
    state::{AppMode, AppState},
};
use client_frontend_core::{MessageLog, ReplayController, ViewModel};

/// Width of the pools / status column.
const SIDE_PANEL_WIDTH: u16 = 36;

/// Rendering context containing all state and configuration needed for UI rendering.
pub struct RenderContext<'a> {
    pub view_model: &'a ViewModel,
    pub messages: &'a MessageLog,
    pub app_state: &'a AppState,
    pub replay: &'a ReplayController,
    pub message_panel_height: u16,
}

/// Render the terminal UI from the view model.
///
/// The timeline row is only shown in replay mode; a blocking notice is drawn
/// as a popup over the board until dismissed.
pub fn render_with_view_model(terminal: &mut Tui, ctx: &RenderContext) -> Result<()> {
    let theme = RatatuiTheme::new();

    terminal.draw(|frame| {
        let timeline_height = match ctx.app_state.mode {
            AppMode::Replay => 3,
            AppMode::Game => 0,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                        // Header
                Constraint::Min(0),                           // Board + side panel
                Constraint::Length(timeline_height),          // Timeline
                Constraint::Length(ctx.message_panel_height), // Messages
                Constraint::Length(1),                        // Footer
            ])
            .split(frame.area());

        widgets::header::render(frame, chunks[0], ctx.view_model, ctx.app_state, &theme);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
            .split(chunks[1]);

        widgets::board::render(frame, body[0], ctx.view_model, ctx.app_state, &theme);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(body[1]);

        widgets::pools::render(frame, side[0], ctx.view_model, &theme);
        widgets::status::render(frame, side[1], ctx.view_model, &theme);

        if timeline_height > 0 {
            widgets::timeline::render(frame, chunks[2], ctx.replay, &theme);
        }

        widgets::messages::render(frame, chunks[3], ctx.messages, &theme);
        widgets::footer::render(frame, chunks[4], ctx.app_state.mode, &theme);

        if let Some(entry) = ctx.view_model.blocking.as_ref() {
            let area = popup_rect(70, 5, body[0]);
            widgets::messages::render_blocking(frame, area, entry, &theme);
        }
    })?;

    Ok(())
}

/// Centered popup `percent_x` wide and `height` rows tall, clipped to `area`.
fn popup_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width.saturating_mul(percent_x) / 100;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
