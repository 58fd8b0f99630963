//! Core domain + application logic for the mosura AniList bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! messaging port implemented in the adapter crate; AniList specifics live in
//! their own adapter on top of the HTTP client here.

pub mod callback;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod http;
pub mod keyboard;
pub mod lang;
pub mod logging;
pub mod messaging;
pub mod pagination;

pub use errors::{Error, Result};
