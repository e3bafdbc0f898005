pub mod config;
pub mod rom;
pub mod ui;
