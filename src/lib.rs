// Lib target so the integration tests can exercise the handlers without
// a terminal attached.
pub mod actions;
pub mod api;
pub mod config;
pub mod console;
pub mod tui;
