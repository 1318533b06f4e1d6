pub mod api;
pub mod browser;
pub mod config;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod output;
pub mod tui;
pub mod view;
