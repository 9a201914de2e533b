//! Transport module — the chat side of the bot.
//!
//! `chat.rs` defines what the core needs from a chat backend,
//! `telegram.rs` implements it over the Telegram Bot API,
//! `fake.rs` records deliveries for tests.

pub mod chat;
pub mod telegram;
pub mod fake;

pub use chat::{ChatTransport, CommandContext, DeliveryError, SharedChat};
pub use telegram::TelegramClient;
