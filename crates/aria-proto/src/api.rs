//! Wire types for the assistant backend API.
//!
//! Shapes mirror what the backend actually sends (Spotify-flavoured JSON).
//! Optional containers default to empty so partial payloads decode instead
//! of erroring — a `/api/me` body without `images`, or a bare
//! `{"is_playing": false}` from `/api/now_playing`, are both valid.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body from `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// `GET /api/me` — the signed-in user's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl UserProfile {
    /// Avatar URL: the first entry of the images list, when there is one.
    pub fn avatar_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

/// `GET /api/playlists` — the first page of the user's playlists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistPage {
    #[serde(default)]
    pub items: Vec<Playlist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub name: String,
}

/// `GET /api/now_playing` — current playback state.
///
/// A backend with nothing playing may answer `{"is_playing": false}` with
/// no `item` at all, so every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NowPlaying {
    #[serde(default)]
    pub is_playing: Option<bool>,
    #[serde(default)]
    pub item: Option<Track>,
    #[serde(default)]
    pub progress_ms: Option<u64>,
}

impl NowPlaying {
    /// True when nothing is playing: an explicit `is_playing: false` or a
    /// missing track item.  An absent `is_playing` with an item present
    /// still counts as playing.
    pub fn is_idle(&self) -> bool {
        self.is_playing == Some(false) || self.item.is_none()
    }

    /// Playback position as a 0.0..=1.0 ratio.
    ///
    /// `None` unless both `progress_ms` and the track's `duration_ms` are
    /// present and nonzero.  A progress reading of exactly zero is treated
    /// as absent; callers keep their last painted value.
    pub fn progress_ratio(&self) -> Option<f64> {
        let progress = self.progress_ms.filter(|&p| p > 0)?;
        let duration = self
            .item
            .as_ref()
            .and_then(|t| t.duration_ms)
            .filter(|&d| d > 0)?;
        Some((progress as f64 / duration as f64).clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Album,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl Track {
    /// Artist names joined with `", "`, server order preserved.
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// First album art entry, when there is one.
    pub fn art_url(&self) -> Option<&str> {
        self.album.images.first().map(|i| i.url.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYING: &str = r#"{
        "is_playing": true,
        "item": {
            "name": "Windowlicker",
            "artists": [{"name": "Aphex Twin"}],
            "album": {"images": [{"url": "https://img.example/aw.jpg"}]},
            "duration_ms": 60000
        },
        "progress_ms": 30000
    }"#;

    #[test]
    fn test_now_playing_active() {
        let np: NowPlaying = serde_json::from_str(PLAYING).unwrap();
        assert!(!np.is_idle());
        let track = np.item.as_ref().unwrap();
        assert_eq!(track.name, "Windowlicker");
        assert_eq!(track.artist_line(), "Aphex Twin");
        assert_eq!(track.art_url(), Some("https://img.example/aw.jpg"));
        assert_eq!(np.progress_ratio(), Some(0.5));
    }

    #[test]
    fn test_now_playing_stopped_flag() {
        let np: NowPlaying = serde_json::from_str(r#"{"is_playing": false}"#).unwrap();
        assert!(np.is_idle());
        assert!(np.progress_ratio().is_none());
    }

    #[test]
    fn test_now_playing_missing_item_is_idle() {
        let np: NowPlaying =
            serde_json::from_str(r#"{"is_playing": true, "progress_ms": 1000}"#).unwrap();
        assert!(np.is_idle());
    }

    #[test]
    fn test_zero_progress_is_treated_as_absent() {
        let np: NowPlaying = serde_json::from_str(
            r#"{
                "is_playing": true,
                "item": {"name": "x", "duration_ms": 60000},
                "progress_ms": 0
            }"#,
        )
        .unwrap();
        assert!(!np.is_idle());
        assert!(np.progress_ratio().is_none());
    }

    #[test]
    fn test_missing_duration_gives_no_ratio() {
        let np: NowPlaying = serde_json::from_str(
            r#"{"is_playing": true, "item": {"name": "x"}, "progress_ms": 1000}"#,
        )
        .unwrap();
        assert!(np.progress_ratio().is_none());
    }

    #[test]
    fn test_profile_without_images_decodes() {
        let p: UserProfile = serde_json::from_str(r#"{"display_name": "ada"}"#).unwrap();
        assert_eq!(p.display_name, "ada");
        assert!(p.avatar_url().is_none());
    }

    #[test]
    fn test_empty_playlist_page() {
        let page: PlaylistPage = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_artist_line_preserves_order() {
        let track: Track = serde_json::from_str(
            r#"{"name": "t", "artists": [{"name": "A"}, {"name": "B"}, {"name": "C"}]}"#,
        )
        .unwrap();
        assert_eq!(track.artist_line(), "A, B, C");
    }
}
