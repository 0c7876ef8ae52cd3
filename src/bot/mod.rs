// ============================================================================
// Module : bot
// ============================================================================
// Logique du bot, indépendante du transport :
// événement -> route -> téléchargement -> extraction -> réponse
// ============================================================================

pub mod context;  // Contexte immuable partagé par les handlers
pub mod events;   // Update Telegram -> Event
pub mod handlers; // Exécution des routes
pub mod render;   // Textes des réponses
pub mod router;   // Table de routage

pub use context::BotContext;
pub use events::Event;
pub use handlers::dispatch;
pub use router::{Route, Router};
