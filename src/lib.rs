//! Core library for modsweep - an interactive scanner & cleaner for
//! dependency cache directories (`node_modules` and friends).
//!
//! The crate is split into a UI-agnostic scanning core (`scanner`, `probe`,
//! `model`, `delete`) and a terminal frontend (`tui`). The `--list` mode in
//! `report` reuses the same core without touching the terminal.

pub mod args;
pub mod delete;
pub mod model;
pub mod probe;
pub mod report;
pub mod scanner;
pub mod tui;
pub mod util;
