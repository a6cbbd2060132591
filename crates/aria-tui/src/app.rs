//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for
//!   components).
//! - A `tokio::mpsc` channel carries terminal events and `SessionEvent`s
//!   in from background tasks.
//! - The event loop draws when something changed, then awaits the next
//!   message.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::debug;

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::{
    chat_panel::ChatPanel, player_bar, playlist_panel::PlaylistPanel, profile_panel,
};
use crate::session::{Session, SessionEvent};
use crate::widgets::status_bar;

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Session(SessionEvent),
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub state: AppState,

    chat_panel: ChatPanel,
    playlist_panel: PlaylistPanel,
    focus: ComponentId,

    session: Session,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            state: AppState::new(),
            chat_panel: ChatPanel::new(),
            playlist_panel: PlaylistPanel::new(),
            focus: ComponentId::ChatPanel,
            session,
            should_quit: false,
        }
    }

    pub async fn run(
        mut self,
        mut session_rx: mpsc::Receiver<SessionEvent>,
        poll_interval_ms: u64,
    ) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: session events ───────────────────────────────────
        let sess_tx = tx.clone();
        tokio::spawn(async move {
            while let Some(ev) = session_rx.recv().await {
                if sess_tx.send(AppMessage::Session(ev)).await.is_err() {
                    break;
                }
            }
        });

        // ── Startup fetches + poller ──────────────────────────────────────────
        self.session.fetch_profile();
        self.session.fetch_playlists();
        self.session.spawn_poller(poll_interval_ms);

        // Pending-bubble animation tick.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }
                _ = ui_tick.tick() => {
                    let actions = self.chat_panel.tick(&self.state);
                    for action in actions {
                        self.dispatch(action);
                    }
                    needs_redraw = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.session.shutdown();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handling ──────────────────────────────────────────────────────

    /// Returns `true` when the message requires a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                let actions = self.handle_key(key);
                for action in actions {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Resize(_, _)) => true,
            AppMessage::Event(_) => false,
            AppMessage::Session(ev) => {
                self.handle_session(ev);
                true
            }
        }
    }

    /// Global keys first, then the focused component.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }
        match key.code {
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::Char('q') if self.focus != ComponentId::ChatPanel => {
                return vec![Action::Quit]
            }
            KeyCode::Esc if self.focus != ComponentId::ChatPanel => {
                return vec![Action::FocusPane(ComponentId::ChatPanel)]
            }
            _ => {}
        }
        match self.focus {
            ComponentId::ChatPanel => self.chat_panel.handle_key(key, &self.state),
            ComponentId::PlaylistPanel => self.playlist_panel.handle_key(key, &self.state),
        }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::SubmitChat(raw) => {
                if let Some(text) = self.state.chat_begin(&raw) {
                    self.chat_panel.input.clear();
                    debug!("chat send: {} chars", text.len());
                    self.session.send_chat(text);
                }
            }
            Action::FocusNext => {
                self.focus = match self.focus {
                    ComponentId::ChatPanel => ComponentId::PlaylistPanel,
                    ComponentId::PlaylistPanel => ComponentId::ChatPanel,
                };
            }
            Action::FocusPane(id) => self.focus = id,
            Action::Quit => self.should_quit = true,
        }
    }

    fn handle_session(&mut self, ev: SessionEvent) {
        match ev {
            SessionEvent::ProfileLoaded(profile) => {
                self.state.connected = true;
                self.state.apply_profile(profile);
            }
            SessionEvent::ProfileFailed(e) => self.state.profile_failed(e),
            SessionEvent::PlaylistsLoaded(items) => {
                self.state.connected = true;
                self.state.apply_playlists(items);
            }
            SessionEvent::PlaylistsFailed(e) => self.state.playlists_failed(e),
            SessionEvent::NowPlayingUpdated(np) => {
                self.state.connected = true;
                self.state.apply_now_playing(np);
            }
            SessionEvent::NowPlayingFailed(e) => {
                // painted player state stays as-is; the next tick retries
                self.state.connected = false;
                self.state.push_log(format!("now-playing poll error: {e}"));
            }
            SessionEvent::ChatReplied(text) => {
                self.state.connected = true;
                self.state.chat_finish(Ok(text));
            }
            SessionEvent::ChatFailed(e) => self.state.chat_finish(Err(e)),
        }
    }

    // ── Layout ────────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(40)])
            .split(rows[0]);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(cols[0]);

        profile_panel::draw(frame, sidebar[0], &self.state);
        let playlists_focused = self.focus == self.playlist_panel.id();
        self.playlist_panel
            .draw(frame, sidebar[1], playlists_focused, &self.state);
        let chat_focused = self.focus == self.chat_panel.id();
        self.chat_panel
            .draw(frame, cols[1], chat_focused, &self.state);
        player_bar::draw(frame, rows[1], &self.state);
        status_bar::draw(frame, rows[2], &self.state, self.focus);
    }
}
