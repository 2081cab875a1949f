//! Core logic for the homework review notifier.
//!
//! This crate is intentionally framework-agnostic. The review API and the chat
//! messenger live behind ports (traits); the Telegram adapter lives in its own crate.

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod poll;
pub mod status;
pub mod validate;

pub use errors::{Error, Result};
