//! PlaylistPanel — the user's playlists, in server order.
//!
//! Selection is visual only (there is nothing to activate); the list
//! scrolls when it outgrows the pane.  Loading, failed, and empty states
//! each render their own row.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::{Action, ComponentId};
use crate::app_state::{AppState, PlaylistSlot};
use crate::component::Component;
use crate::theme::{
    style_default, style_error, style_muted, style_selected, style_selected_focused, C_BADGE_ERR,
    C_MUTED,
};
use crate::widgets::pane_chrome::{pane_chrome, Badge};

pub struct PlaylistPanel {
    selected: usize,
    scroll_offset: usize,
}

impl PlaylistPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
        }
    }

    fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    fn select_down(&mut self, n: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + n).min(len - 1);
    }

    fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }
}

impl Component for PlaylistPanel {
    fn id(&self) -> ComponentId {
        ComponentId::PlaylistPanel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = match &state.playlists {
            PlaylistSlot::Loaded(items) => items.len(),
            _ => 0,
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(1, len),
            KeyCode::PageUp => self.select_up(10),
            KeyCode::PageDown => self.select_down(10, len),
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
                self.scroll_offset = 0;
            }
            KeyCode::End | KeyCode::Char('G') => self.selected = len.saturating_sub(1),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = match &state.playlists {
            PlaylistSlot::Failed => Some(Badge {
                text: "ERR",
                color: C_BADGE_ERR,
            }),
            _ => None,
        };
        let block = pane_chrome("playlists", focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        match &state.playlists {
            PlaylistSlot::Loading => {
                frame.render_widget(
                    Paragraph::new(Span::styled("  loading playlists…", style_muted())),
                    inner,
                );
            }
            PlaylistSlot::Failed => {
                frame.render_widget(
                    Paragraph::new(Span::styled("  Error loading playlists", style_error())),
                    inner,
                );
            }
            PlaylistSlot::Loaded(items) if items.is_empty() => {
                frame.render_widget(
                    Paragraph::new(Span::styled("  no playlists", style_muted())),
                    inner,
                );
            }
            PlaylistSlot::Loaded(items) => {
                let height = inner.height as usize;
                if self.selected >= items.len() {
                    self.selected = items.len() - 1;
                }
                self.ensure_visible(height);

                let lines: Vec<Line> = items
                    .iter()
                    .enumerate()
                    .skip(self.scroll_offset)
                    .take(height)
                    .map(|(i, playlist)| {
                        let row_style = if i == self.selected && focused {
                            style_selected_focused()
                        } else if i == self.selected {
                            style_selected()
                        } else {
                            style_default()
                        };
                        Line::from(vec![
                            Span::styled(" ♪ ", Style::default().fg(C_MUTED)),
                            Span::styled(playlist.name.as_str(), row_style),
                        ])
                    })
                    .collect();

                frame.render_widget(Paragraph::new(lines), inner);
            }
        }
    }
}
