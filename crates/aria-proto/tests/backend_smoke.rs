//! Network smoke harness against a running assistant backend.
//!
//! Run explicitly:
//!   ARIA_BACKEND_URL=http://127.0.0.1:8000 cargo test -p aria-proto -- --ignored --nocapture

use aria_proto::client::ApiClient;

fn backend_url() -> String {
    std::env::var("ARIA_BACKEND_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
}

#[tokio::test]
#[ignore = "requires a running backend; run explicitly with --ignored --nocapture"]
async fn smoke_read_endpoints() {
    let client = ApiClient::new(backend_url());

    let profile = client.me().await.expect("GET /api/me failed");
    println!("profile: {} (avatar: {:?})", profile.display_name, profile.avatar_url());
    assert!(!profile.display_name.is_empty());

    let playlists = client.playlists().await.expect("GET /api/playlists failed");
    println!("{} playlists", playlists.items.len());

    let np = client.now_playing().await.expect("GET /api/now_playing failed");
    match np.item.as_ref() {
        Some(track) if !np.is_idle() => {
            println!("playing: {} — {}", track.name, track.artist_line())
        }
        _ => println!("not playing"),
    }
}

#[tokio::test]
#[ignore = "requires a running backend; run explicitly with --ignored --nocapture"]
async fn smoke_chat_round_trip() {
    let client = ApiClient::new(backend_url());
    let reply = client
        .chat("What's playing right now?")
        .await
        .expect("POST /api/chat failed");
    println!("reply: {}", reply.response);
    assert!(!reply.response.is_empty());
}
