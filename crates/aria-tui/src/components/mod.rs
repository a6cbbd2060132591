pub mod chat_panel;
pub mod player_bar;
pub mod playlist_panel;
pub mod profile_panel;
