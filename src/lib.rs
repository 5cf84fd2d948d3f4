//! uiset-driver: Scripted UI Harness Driver
//!
//! Connects to a remote UI test harness and replays a randomized
//! sequence of uiset commands (slider moves, live mode toggles,
//! view resets), logging both responses of every command.

pub mod command;
pub mod connection;
pub mod runner;
pub mod error;
