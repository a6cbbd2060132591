pub mod chat_input;
pub mod pane_chrome;
pub mod progress_bar;
pub mod status_bar;
