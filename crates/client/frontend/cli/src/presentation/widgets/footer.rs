//! One-line key binding hints for the current mode.

use ratatui::{Frame, layout::Rect, widgets::Paragraph};

use crate::{presentation::theme::RatatuiTheme, state::AppMode};

pub fn render(frame: &mut Frame, area: Rect, mode: AppMode, theme: &RatatuiTheme) {
    let hints = match mode {
        AppMode::Game => {
            "arrows move | Enter place/rotate | c confirm | Esc cancel | 1-9 piece | n new game | Tab replay | q quit"
        }
        AppMode::Replay => {
            "Left/Right step | Home/End first/last | Space play | +/- speed | o open | Tab game | q quit"
        }
    };
    frame.render_widget(Paragraph::new(hints).style(theme.muted()), area);
}
