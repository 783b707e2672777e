pub mod app;
pub mod catalog;
pub mod config;
pub mod event;
pub mod input;
pub mod logging;
pub mod navigator;
pub mod session;
pub mod ui;
