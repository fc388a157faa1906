//! FreelanceTM - Telegram marketplace bot for freelancers and clients
//!
//! The bot runs as a webhook handler: Telegram POSTs each update to
//! `/{BOT_TOKEN}`, the update is routed to a handler, and the reply goes back
//! in the HTTP response. All state lives in process memory.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, security helpers and the HTTP server
//! - `i18n`: Fluent text catalog (Russian and Turkmen)
//! - `storage`: In-memory users, orders, responses, reviews and sessions
//! - `telegram`: Update decoding, handlers, keyboards and Bot API access

pub mod cli;
pub mod core;
pub mod i18n;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult, BotConfig};
pub use storage::MemoryStore;
pub use telegram::{handle_update, HandlerDeps};
