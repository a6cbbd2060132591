//! Profile block — avatar marker plus display name, top of the sidebar.
//!
//! Terminal stand-in for the avatar image: a filled marker when the
//! profile carries an avatar URL, a hollow placeholder otherwise.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::{AppState, ProfileSlot};
use crate::theme::{style_error, style_muted, C_ACCENT, C_BADGE_ERR, C_MUTED, C_PRIMARY};
use crate::widgets::pane_chrome::{pane_chrome, Badge};

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let badge = match &state.profile {
        ProfileSlot::Failed => Some(Badge {
            text: "ERR",
            color: C_BADGE_ERR,
        }),
        _ => None,
    };
    let block = pane_chrome("profile", false, badge);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let line = match &state.profile {
        ProfileSlot::Loading => Line::from(Span::styled(" loading profile…", style_muted())),
        ProfileSlot::Failed => Line::from(Span::styled(" Failed to load profile", style_error())),
        ProfileSlot::Loaded(profile) => {
            let marker = if profile.avatar_url().is_some() {
                Span::styled("◉", Style::default().fg(C_ACCENT))
            } else {
                Span::styled("○", Style::default().fg(C_MUTED))
            };
            Line::from(vec![
                Span::raw(" "),
                marker,
                Span::raw(" "),
                Span::styled(
                    profile.display_name.as_str(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line), inner);
}
