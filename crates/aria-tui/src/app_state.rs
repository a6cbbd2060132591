//! AppState — shared view state passed read-only to components.
//!
//! The App event-loop is the only writer.  Every chat/profile/playlist/
//! player transition lives here as a plain method, so the observable
//! behavior can be driven directly in tests without a terminal or a
//! network.

use chrono::{DateTime, Local};

use aria_proto::api::{NowPlaying, Playlist, UserProfile};

/// Fallback bubble shown when a chat request fails for any reason —
/// transport error and undecodable body collapse to the same message.
pub const CHAT_FALLBACK: &str = "Sorry, something went wrong with the connection.";

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One bubble in the chat log.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: Sender,
    pub body: String,
    /// Placeholder bubble shown between send and reply arrival.
    pub pending: bool,
    pub at: DateTime<Local>,
}

impl ChatMessage {
    fn user(body: String) -> Self {
        Self {
            sender: Sender::User,
            body,
            pending: false,
            at: Local::now(),
        }
    }

    fn assistant(body: String) -> Self {
        Self {
            sender: Sender::Assistant,
            body,
            pending: false,
            at: Local::now(),
        }
    }

    fn pending() -> Self {
        Self {
            sender: Sender::Assistant,
            body: String::new(),
            pending: true,
            at: Local::now(),
        }
    }
}

/// A fetch-once region: loading until its startup fetch lands.
#[derive(Debug, Clone)]
pub enum ProfileSlot {
    Loading,
    Loaded(UserProfile),
    Failed,
}

#[derive(Debug, Clone)]
pub enum PlaylistSlot {
    Loading,
    Loaded(Vec<Playlist>),
    Failed,
}

/// Now-playing display mode.  Both variants are rebuilt fresh on every
/// successful poll; nothing is merged with the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerView {
    Idle,
    Active(ActiveTrack),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTrack {
    pub track: String,
    pub artists: String,
    pub art_url: Option<String>,
}

/// The full shared state of the application.
/// Components read this; only the App event-loop writes to it.
pub struct AppState {
    // ── Chat ────────────────────────────────────────────────────────────────
    pub chat: Vec<ChatMessage>,
    /// In-flight flag: true while a chat request awaits its reply.  The
    /// sole send gate — no second send starts while set.
    pub chat_busy: bool,

    // ── Sidebar ─────────────────────────────────────────────────────────────
    pub profile: ProfileSlot,
    pub playlists: PlaylistSlot,

    // ── Player ──────────────────────────────────────────────────────────────
    pub player: PlayerView,
    /// Painted progress-bar value, 0.0..=1.0.  Updated only when a poll
    /// carries usable progress data; reset to zero on idle.
    pub progress_ratio: f64,
    pub progress_ms: Option<u64>,
    pub duration_ms: Option<u64>,

    // ── Session ─────────────────────────────────────────────────────────────
    /// True after the last backend interaction succeeded.
    pub connected: bool,
    pub logs: Vec<String>,
}

const LOG_CAP: usize = 200;

impl AppState {
    pub fn new() -> Self {
        Self {
            chat: Vec::new(),
            chat_busy: false,
            profile: ProfileSlot::Loading,
            playlists: PlaylistSlot::Loading,
            player: PlayerView::Idle,
            progress_ratio: 0.0,
            progress_ms: None,
            duration_ms: None,
            connected: false,
            logs: Vec::new(),
        }
    }

    // ── Chat flow ───────────────────────────────────────────────────────────

    /// Begin a send: trim, then gate on emptiness and the in-flight flag.
    ///
    /// On acceptance the user bubble and one pending assistant bubble are
    /// appended, the flag is set, and the trimmed text is returned for the
    /// caller to POST.  Returns `None` — and mutates nothing — when the
    /// text trims to empty or a send is already in flight.
    pub fn chat_begin(&mut self, raw: &str) -> Option<String> {
        let text = raw.trim();
        if text.is_empty() || self.chat_busy {
            return None;
        }
        self.chat.push(ChatMessage::user(text.to_string()));
        self.chat_busy = true;
        self.chat.push(ChatMessage::pending());
        Some(text.to_string())
    }

    /// Finish a send: drop the pending bubble, append the reply or the
    /// fixed fallback.  The in-flight flag is cleared in both arms.
    pub fn chat_finish(&mut self, reply: Result<String, String>) {
        self.chat.retain(|m| !m.pending);
        match reply {
            Ok(text) => self.chat.push(ChatMessage::assistant(text)),
            Err(err) => {
                self.push_log(format!("chat error: {err}"));
                self.chat.push(ChatMessage::assistant(CHAT_FALLBACK.to_string()));
            }
        }
        self.chat_busy = false;
    }

    // ── Sidebar ─────────────────────────────────────────────────────────────

    pub fn apply_profile(&mut self, profile: UserProfile) {
        self.profile = ProfileSlot::Loaded(profile);
    }

    pub fn profile_failed(&mut self, err: String) {
        self.push_log(format!("profile load error: {err}"));
        self.profile = ProfileSlot::Failed;
    }

    /// Replace the playlist region wholesale.  An empty list is a valid
    /// empty state, not an error.
    pub fn apply_playlists(&mut self, items: Vec<Playlist>) {
        self.playlists = PlaylistSlot::Loaded(items);
    }

    pub fn playlists_failed(&mut self, err: String) {
        self.push_log(format!("playlist load error: {err}"));
        self.playlists = PlaylistSlot::Failed;
    }

    // ── Player ──────────────────────────────────────────────────────────────

    /// Apply one successful now-playing poll.
    ///
    /// Idle resets the bar to zero.  An active track replaces the view
    /// wholesale, but the painted bar only moves when the poll carried a
    /// usable progress/duration pair — a zero or missing reading leaves it
    /// where it was.
    pub fn apply_now_playing(&mut self, np: NowPlaying) {
        if np.is_idle() {
            self.player = PlayerView::Idle;
            self.progress_ratio = 0.0;
            self.progress_ms = None;
            self.duration_ms = None;
            return;
        }
        if let Some(ratio) = np.progress_ratio() {
            self.progress_ratio = ratio;
            self.progress_ms = np.progress_ms;
            self.duration_ms = np.item.as_ref().and_then(|t| t.duration_ms);
        }
        if let Some(track) = np.item {
            self.player = PlayerView::Active(ActiveTrack {
                artists: track.artist_line(),
                art_url: track.art_url().map(str::to_string),
                track: track.name,
            });
        }
    }

    // ── Logs ────────────────────────────────────────────────────────────────

    pub fn push_log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > LOG_CAP {
            let excess = self.logs.len() - LOG_CAP;
            self.logs.drain(..excess);
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use aria_proto::api::{Album, Artist, Image, Track};

    fn playing(progress_ms: Option<u64>, duration_ms: Option<u64>) -> NowPlaying {
        NowPlaying {
            is_playing: Some(true),
            item: Some(Track {
                name: "Xtal".to_string(),
                artists: vec![Artist {
                    name: "Aphex Twin".to_string(),
                }],
                album: Album {
                    images: vec![Image {
                        url: "https://img.example/xtal.jpg".to_string(),
                    }],
                },
                duration_ms,
            }),
            progress_ms,
        }
    }

    fn stopped() -> NowPlaying {
        NowPlaying {
            is_playing: Some(false),
            item: None,
            progress_ms: None,
        }
    }

    // ── chat flow ────────────────────────────────────────────────────────────

    #[test]
    fn test_send_appends_user_and_pending() {
        let mut state = AppState::new();
        let sent = state.chat_begin("  hello there  ");
        assert_eq!(sent.as_deref(), Some("hello there"));
        assert!(state.chat_busy);
        assert_eq!(state.chat.len(), 2);
        assert_eq!(state.chat[0].sender, Sender::User);
        assert_eq!(state.chat[0].body, "hello there");
        assert!(state.chat[1].pending);
    }

    #[test]
    fn test_send_gated_while_in_flight() {
        let mut state = AppState::new();
        state.chat_begin("first").unwrap();
        assert!(state.chat_begin("second").is_none());
        // no extra messages beyond user + pending
        assert_eq!(state.chat.len(), 2);
    }

    #[test]
    fn test_send_rejects_whitespace_only() {
        let mut state = AppState::new();
        assert!(state.chat_begin("   \t ").is_none());
        assert!(state.chat.is_empty());
        assert!(!state.chat_busy);
    }

    #[test]
    fn test_finish_success_clears_flag_and_pending() {
        let mut state = AppState::new();
        state.chat_begin("what's playing?").unwrap();
        state.chat_finish(Ok("Xtal by Aphex Twin".to_string()));
        assert!(!state.chat_busy);
        assert!(state.chat.iter().all(|m| !m.pending));
        let last = state.chat.last().unwrap();
        assert_eq!(last.sender, Sender::Assistant);
        assert_eq!(last.body, "Xtal by Aphex Twin");
    }

    #[test]
    fn test_finish_failure_replaces_pending_with_fallback() {
        let mut state = AppState::new();
        state.chat_begin("hello").unwrap();
        state.chat_finish(Err("connection refused".to_string()));
        assert!(!state.chat_busy);
        assert!(state.chat.iter().all(|m| !m.pending));
        assert_eq!(state.chat.last().unwrap().body, CHAT_FALLBACK);
    }

    #[test]
    fn test_at_most_one_pending_bubble() {
        let mut state = AppState::new();
        state.chat_begin("one").unwrap();
        state.chat_finish(Ok("reply".to_string()));
        state.chat_begin("two").unwrap();
        assert_eq!(state.chat.iter().filter(|m| m.pending).count(), 1);
    }

    #[test]
    fn test_multiline_reply_kept_verbatim() {
        let mut state = AppState::new();
        state.chat_begin("hi").unwrap();
        state.chat_finish(Ok("a\nb".to_string()));
        // the renderer splits on '\n'; the body itself keeps the newline
        assert_eq!(state.chat.last().unwrap().body, "a\nb");
    }

    // ── player ───────────────────────────────────────────────────────────────

    #[test]
    fn test_progress_fifty_percent() {
        let mut state = AppState::new();
        state.apply_now_playing(playing(Some(30_000), Some(60_000)));
        assert!(matches!(state.player, PlayerView::Active(_)));
        assert_eq!(state.progress_ratio, 0.5);
        assert_eq!(state.progress_ms, Some(30_000));
        assert_eq!(state.duration_ms, Some(60_000));
    }

    #[test]
    fn test_idle_resets_bar_regardless_of_prior_state() {
        let mut state = AppState::new();
        state.apply_now_playing(playing(Some(30_000), Some(60_000)));
        state.apply_now_playing(stopped());
        assert_eq!(state.player, PlayerView::Idle);
        assert_eq!(state.progress_ratio, 0.0);
        assert!(state.progress_ms.is_none());
    }

    #[test]
    fn test_missing_item_renders_idle() {
        let mut state = AppState::new();
        state.apply_now_playing(NowPlaying {
            is_playing: Some(true),
            item: None,
            progress_ms: Some(1000),
        });
        assert_eq!(state.player, PlayerView::Idle);
    }

    #[test]
    fn test_zero_progress_leaves_bar_painted() {
        let mut state = AppState::new();
        state.apply_now_playing(playing(Some(30_000), Some(60_000)));
        state.apply_now_playing(playing(Some(0), Some(60_000)));
        assert!(matches!(state.player, PlayerView::Active(_)));
        assert_eq!(state.progress_ratio, 0.5);
    }

    #[test]
    fn test_active_view_rebuilt_fresh() {
        let mut state = AppState::new();
        state.apply_now_playing(playing(Some(10_000), Some(60_000)));
        let mut second = playing(Some(20_000), Some(40_000));
        if let Some(track) = second.item.as_mut() {
            track.name = "Rhubarb".to_string();
        }
        state.apply_now_playing(second);
        match &state.player {
            PlayerView::Active(t) => assert_eq!(t.track, "Rhubarb"),
            other => panic!("expected active view, got {other:?}"),
        }
        assert_eq!(state.progress_ratio, 0.5);
    }

    // ── sidebar ──────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_playlists_is_empty_state_not_error() {
        let mut state = AppState::new();
        state.apply_playlists(Vec::new());
        match &state.playlists {
            PlaylistSlot::Loaded(items) => assert!(items.is_empty()),
            other => panic!("expected loaded slot, got {other:?}"),
        }
    }

    #[test]
    fn test_profile_without_images_loads() {
        let mut state = AppState::new();
        state.apply_profile(UserProfile {
            display_name: "ada".to_string(),
            images: Vec::new(),
        });
        match &state.profile {
            ProfileSlot::Loaded(p) => assert!(p.avatar_url().is_none()),
            other => panic!("expected loaded slot, got {other:?}"),
        }
    }

    #[test]
    fn test_log_buffer_is_capped() {
        let mut state = AppState::new();
        for i in 0..300 {
            state.push_log(format!("line {i}"));
        }
        assert_eq!(state.logs.len(), 200);
        assert_eq!(state.logs.last().unwrap(), "line 299");
    }
}
