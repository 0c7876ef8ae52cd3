// ============================================================================
// Module : telegram
// ============================================================================
// Transport vers l'API Telegram Bot : types JSON, client HTTP, claviers,
// et le trait ReplySink utilisé par les handlers
// ============================================================================

pub mod client;    // Client HTTP de l'API Bot
pub mod keyboards; // Claviers du menu, des news, du bouton Back
pub mod reply;     // Trait ReplySink + ReplyTarget
pub mod types;     // Objets JSON de l'API

pub use client::TelegramClient;
pub use reply::{ReplySink, ReplyTarget};
pub use types::{CallbackQuery, Message, ReplyMarkup, Update, User};
