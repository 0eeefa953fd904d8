//! # tgbot-api
//!
//! Minimal Telegram Bot API client.
//!
//! Wraps `getUpdates` and `sendMessage`, and turns repeated `getUpdates`
//! calls into a continuous stream of [`Update`]s.
//! Docs: <https://core.telegram.org/bots/api>

pub mod client;
pub mod method;
pub mod transport;
pub mod types;

pub use client::stream::{PollError, PollHandle, UpdateStream};
pub use client::BotApi;
pub use method::ApiMethod;
pub use transport::{HttpResponse, ReqwestTransport, Transport};
pub use types::{Chat, Message, SendMessageResponse, SentMessage, Update, User};
