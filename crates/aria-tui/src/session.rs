//! Session — the client half of the backend conversation.
//!
//! Owns the `ApiClient`, the event channel into the App, and the
//! now-playing poll task.  Lifecycle: built at startup, `shutdown()` when
//! the UI exits (aborts the poller).  Every fetch runs as its own spawned
//! task and reports back as a `SessionEvent`; failures never escape a
//! task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use aria_proto::api::{NowPlaying, Playlist, UserProfile};
use aria_proto::client::ApiClient;

/// Messages from session tasks to the App event-loop.
#[derive(Debug)]
pub enum SessionEvent {
    ProfileLoaded(UserProfile),
    ProfileFailed(String),
    PlaylistsLoaded(Vec<Playlist>),
    PlaylistsFailed(String),
    NowPlayingUpdated(NowPlaying),
    NowPlayingFailed(String),
    ChatReplied(String),
    ChatFailed(String),
}

pub struct Session {
    client: Arc<ApiClient>,
    events: mpsc::Sender<SessionEvent>,
    poller: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(client: ApiClient, events: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            client: Arc::new(client),
            events,
            poller: None,
        }
    }

    /// One-shot startup fetch of the profile region.  No retry.
    pub fn fetch_profile(&self) {
        let client = self.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let event = match client.me().await {
                Ok(profile) => SessionEvent::ProfileLoaded(profile),
                Err(e) => {
                    warn!("profile fetch failed: {e:#}");
                    SessionEvent::ProfileFailed(e.to_string())
                }
            };
            let _ = tx.send(event).await;
        });
    }

    /// One-shot startup fetch of the playlist region.  First page only.
    pub fn fetch_playlists(&self) {
        let client = self.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let event = match client.playlists().await {
                Ok(page) => SessionEvent::PlaylistsLoaded(page.items),
                Err(e) => {
                    warn!("playlist fetch failed: {e:#}");
                    SessionEvent::PlaylistsFailed(e.to_string())
                }
            };
            let _ = tx.send(event).await;
        });
    }

    /// Send one chat message.  The in-flight gate lives in the view state;
    /// this only performs the POST and reports the outcome.
    pub fn send_chat(&self, text: String) {
        let client = self.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let event = match client.chat(&text).await {
                Ok(reply) => SessionEvent::ChatReplied(reply.response),
                Err(e) => {
                    warn!("chat send failed: {e:#}");
                    SessionEvent::ChatFailed(e.to_string())
                }
            };
            let _ = tx.send(event).await;
        });
    }

    /// Start the now-playing poller: one poll immediately, then every
    /// `interval_ms`, for as long as the session lives.  Ticks are never
    /// paused or backed off.  Each poll runs as its own task, so a stalled
    /// request never delays the next tick — when responses overlap, the
    /// later one to land wins.
    pub fn spawn_poller(&mut self, interval_ms: u64) {
        let client = self.client.clone();
        let tx = self.events.clone();
        info!("now-playing poller starting, interval {interval_ms} ms");
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                // first tick completes immediately
                ticker.tick().await;
                let client = client.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    poll_now_playing(&client, &tx).await;
                });
            }
        });
        self.poller = Some(handle);
    }

    /// Abort the poll task.  Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.abort();
        }
    }
}

/// One now-playing poll.  Failures are logged and reported; the renderer
/// leaves the painted state untouched until a poll succeeds.
async fn poll_now_playing(client: &ApiClient, tx: &mpsc::Sender<SessionEvent>) {
    let event = match client.now_playing().await {
        Ok(np) => SessionEvent::NowPlayingUpdated(np),
        Err(e) => {
            warn!("now-playing poll failed: {e:#}");
            SessionEvent::NowPlayingFailed(e.to_string())
        }
    };
    let _ = tx.send(event).await;
}
