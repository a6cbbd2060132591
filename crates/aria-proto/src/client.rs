//! HTTP client for the assistant backend.
//!
//! One shared `reqwest::Client` rooted at the backend base URL.  Every call
//! decodes the response body as JSON without inspecting the HTTP status
//! first: the backend reports errors in-band, and a body that fails to
//! decode is the failure case.  No timeout is applied — a stalled request
//! parks only its own caller.

use anyhow::{Context, Result};

use crate::api::{ChatReply, ChatRequest, NowPlaying, PlaylistPage, UserProfile};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /api/chat` — send one user message, get the assistant reply.
    pub async fn chat(&self, message: &str) -> Result<ChatReply> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        let resp = self
            .http
            .post(self.url("/api/chat"))
            .json(&body)
            .send()
            .await
            .context("chat request failed")?;
        resp.json().await.context("chat response was not valid JSON")
    }

    /// `GET /api/me`.
    pub async fn me(&self) -> Result<UserProfile> {
        let resp = self
            .http
            .get(self.url("/api/me"))
            .send()
            .await
            .context("profile request failed")?;
        resp.json()
            .await
            .context("profile response was not valid JSON")
    }

    /// `GET /api/playlists` — first page only; no pagination follow-up.
    pub async fn playlists(&self) -> Result<PlaylistPage> {
        let resp = self
            .http
            .get(self.url("/api/playlists"))
            .send()
            .await
            .context("playlist request failed")?;
        resp.json()
            .await
            .context("playlist response was not valid JSON")
    }

    /// `GET /api/now_playing`.
    pub async fn now_playing(&self) -> Result<NowPlaying> {
        let resp = self
            .http
            .get(self.url("/api/now_playing"))
            .send()
            .await
            .context("now-playing request failed")?;
        resp.json()
            .await
            .context("now-playing response was not valid JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/api/me"), "http://localhost:8000/api/me");
    }

    #[test]
    fn test_url_join() {
        let client = ApiClient::new("http://127.0.0.1:8000");
        assert_eq!(
            client.url("/api/now_playing"),
            "http://127.0.0.1:8000/api/now_playing"
        );
    }
}
