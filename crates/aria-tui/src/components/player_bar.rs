//! Player bar — bottom now-playing strip.
//!
//! Two rows: track line (art marker, name, artists) and the progress bar.
//! The idle state shows the placeholder marker, "Not Playing", a dash for
//! the artist, and an empty bar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::{AppState, PlayerView};
use crate::theme::{C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY};
use crate::widgets::progress_bar::draw_progress;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height < 2 {
        return;
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    match &state.player {
        PlayerView::Idle => {
            let line = Line::from(vec![
                Span::styled(" ♪ ", Style::default().fg(C_MUTED)),
                Span::styled("Not Playing", Style::default().fg(C_SECONDARY)),
                Span::styled("  -", Style::default().fg(C_MUTED)),
            ]);
            frame.render_widget(Paragraph::new(line), chunks[0]);
            draw_progress(frame, chunks[1], 0.0, None, None);
        }
        PlayerView::Active(track) => {
            let marker = if track.art_url.is_some() {
                Span::styled(" ▣ ", Style::default().fg(C_PLAYING))
            } else {
                Span::styled(" ♪ ", Style::default().fg(C_MUTED))
            };
            let line = Line::from(vec![
                marker,
                Span::styled(
                    track.track.as_str(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(track.artists.as_str(), Style::default().fg(C_SECONDARY)),
            ]);
            frame.render_widget(Paragraph::new(line), chunks[0]);
            draw_progress(
                frame,
                chunks[1],
                state.progress_ratio,
                state.progress_ms,
                state.duration_ms,
            );
        }
    }
}
