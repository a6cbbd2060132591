//! ChatInput — wraps tui-input as the message compose line.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_INPUT_FG, C_MUTED, C_PENDING, C_SECONDARY};

pub enum InputAction {
    /// Enter pressed — submit the current text.  The caller clears the
    /// line only once the send is actually accepted.
    Submitted(String),
    Changed,
}

pub struct ChatInput {
    input: Input,
    placeholder: String,
}

impl ChatInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => InputAction::Submitted(self.input.value().to_string()),
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                InputAction::Changed
            }
        }
    }

    /// Render the compose line.  The prompt glyph dims to an ellipsis while
    /// a send is in flight (the send control in its disabled state).
    pub fn draw(&self, frame: &mut Frame, area: Rect, focused: bool, send_enabled: bool) {
        if area.height == 0 {
            return;
        }
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();

        let prompt = if send_enabled {
            Span::styled("> ", Style::default().fg(C_SECONDARY))
        } else {
            Span::styled("… ", Style::default().fg(C_PENDING))
        };

        let text = if value.is_empty() {
            Span::styled(self.placeholder.clone(), Style::default().fg(C_MUTED))
        } else {
            Span::styled(value[scroll..].to_string(), Style::default().fg(C_INPUT_FG))
        };

        frame.render_widget(Paragraph::new(Line::from(vec![prompt, text])), area);

        if focused {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}

impl Default for ChatInput {
    fn default() -> Self {
        Self::new("ask the assistant…")
    }
}
