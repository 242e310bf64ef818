pub mod app;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod git;
pub mod logging;
pub mod model;
pub mod parser;
pub mod session;
pub mod store;
pub mod timer;
pub mod tui;
pub mod ui;
pub mod view;
