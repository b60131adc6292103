//! Core of the homework status bot.
//!
//! Polls the homework review API, turns status changes into chat notifications,
//! and keeps going through transient failures. The chat transport lives behind
//! `messaging::port::MessagingPort`, implemented in an adapter crate.

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod notifier;
pub mod poller;
pub mod status;
pub mod tokens;

pub use errors::{Error, Result};
