// src/lib.rs
pub mod app;
pub mod calendar;
pub mod cli;
pub mod dispatch;
pub mod errors;
pub mod event;
pub mod events_download;
pub mod format;
pub mod loader;
pub mod logging;
pub mod modal;
pub mod table;
pub mod theme;
pub mod ui;

pub mod widgets;
