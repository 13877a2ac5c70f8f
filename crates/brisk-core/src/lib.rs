//! Core state machines and ambient services for Brisk.
//!
//! Nothing in this crate touches the terminal. The TUI crate drives these
//! types from its reducer and executes the `TimerCommand`s they return.

pub mod config;
pub mod data;
pub mod debounce;
pub mod loader;
pub mod logging;
pub mod memo;
pub mod metrics;
pub mod schedule;

#[cfg(test)]
pub(crate) mod sim;
