//! ChatPanel — conversation log plus the compose line.
//!
//! The log auto-sticks to the bottom when new messages arrive; scrolling
//! up detaches it until the user returns to the bottom.  The pending
//! bubble animates its ellipsis from `tick()`.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::action::{Action, ComponentId};
use crate::app_state::{AppState, ChatMessage, Sender};
use crate::component::Component;
use crate::theme::{style_default, C_ACCENT, C_MUTED, C_PENDING, C_USER};
use crate::widgets::chat_input::{ChatInput, InputAction};
use crate::widgets::pane_chrome::pane_chrome;

const PENDING_FRAMES: [&str; 4] = ["·", "··", "···", "··"];

pub struct ChatPanel {
    pub input: ChatInput,
    scroll: usize,
    last_line_count: usize,
    spinner_phase: usize,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self {
            input: ChatInput::default(),
            // usize::MAX = stick to bottom
            scroll: usize::MAX,
            last_line_count: 0,
            spinner_phase: 0,
        }
    }
}

impl Component for ChatPanel {
    fn id(&self) -> ComponentId {
        ComponentId::ChatPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                vec![]
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                vec![]
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(10);
                vec![]
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                vec![]
            }
            _ => match self.input.handle_key(key) {
                InputAction::Submitted(text) => vec![Action::SubmitChat(text)],
                InputAction::Changed => vec![],
            },
        }
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        if state.chat.iter().any(|m| m.pending) {
            self.spinner_phase = self.spinner_phase.wrapping_add(1);
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("chat", focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        self.draw_log(frame, chunks[0], state);
        self.input
            .draw(frame, chunks[1], focused, !state.chat_busy);
    }
}

impl ChatPanel {
    fn draw_log(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height == 0 {
            return;
        }

        if state.chat.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  start the conversation below",
                    Style::default().fg(C_MUTED),
                )),
                area,
            );
            return;
        }

        let lines: Vec<Line> = state
            .chat
            .iter()
            .flat_map(|msg| message_lines(msg, self.spinner_phase))
            .collect();

        let height = area.height as usize;
        let total = lines.len();

        // Auto-scroll to bottom when new lines arrived and we were at bottom
        if total > self.last_line_count {
            let max_scroll = total.saturating_sub(height);
            if self.scroll >= max_scroll.saturating_sub(1) {
                self.scroll = usize::MAX;
            }
            self.last_line_count = total;
        }

        let max_scroll = total.saturating_sub(height);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }

        let visible: Vec<Line> = lines.into_iter().skip(self.scroll).take(height).collect();
        frame.render_widget(Paragraph::new(visible).wrap(Wrap { trim: false }), area);
    }
}

/// Flatten one message into rendered lines: a label line, then the body
/// with embedded newlines split into separate lines.
fn message_lines(msg: &ChatMessage, spinner_phase: usize) -> Vec<Line<'_>> {
    let (label, color) = match msg.sender {
        Sender::User => ("you", C_USER),
        Sender::Assistant => ("aria", C_ACCENT),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(
            msg.at.format("%H:%M").to_string(),
            Style::default().fg(C_MUTED),
        ),
    ])];

    if msg.pending {
        lines.push(Line::from(Span::styled(
            format!("  {}", PENDING_FRAMES[spinner_phase % PENDING_FRAMES.len()]),
            Style::default().fg(C_PENDING),
        )));
    } else {
        for body_line in split_body(&msg.body) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(body_line, style_default()),
            ]));
        }
    }

    lines
}

/// Embedded newlines become separate rendered lines.
fn split_body(body: &str) -> Vec<&str> {
    body.split('\n').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_becomes_line_break() {
        assert_eq!(split_body("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_single_line_body() {
        assert_eq!(split_body("hello"), vec!["hello"]);
    }

    #[test]
    fn test_trailing_newline_keeps_blank_line() {
        assert_eq!(split_body("a\n"), vec!["a", ""]);
    }
}
