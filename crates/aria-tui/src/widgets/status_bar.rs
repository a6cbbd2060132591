//! Status bar — bottom line with connection state and key hints.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::ComponentId;
use crate::app_state::AppState;
use crate::theme::{style_secondary, C_ERROR, C_MUTED, C_PENDING, C_PLAYING};

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, focus: ComponentId) {
    if area.height == 0 {
        return;
    }

    let conn_span = if state.connected {
        Span::styled("●", Style::default().fg(C_PLAYING))
    } else {
        Span::styled("○", Style::default().fg(C_ERROR))
    };

    let mut spans = vec![conn_span, Span::raw(" ")];

    if state.chat_busy {
        spans.push(Span::styled("sending… ", Style::default().fg(C_PENDING)));
    }

    let keys = match focus {
        ComponentId::ChatPanel => " Enter send  ↑↓ scroll  Tab playlists  Ctrl-C quit",
        ComponentId::PlaylistPanel => " ↑↓/jk select  Tab/Esc chat  q quit",
    };
    spans.push(Span::styled(keys, Style::default().fg(C_MUTED)));

    if let Some(last) = state.logs.last() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(last.clone(), style_secondary()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
