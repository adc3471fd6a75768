pub mod animator;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod format;
pub mod insight;
pub mod state;
pub mod ui;
