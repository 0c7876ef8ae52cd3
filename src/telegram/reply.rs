// ============================================================================
// Couche de réponse
// ============================================================================
// Trait entre les handlers du bot et le transport Telegram
//
// CONCEPTS RUST :
// 1. Trait objects : les handlers reçoivent &dyn ReplySink
// 2. async-trait : méthodes async utilisables derrière un dyn
// 3. Send + Sync : le sink est partagé entre les tâches tokio
// ============================================================================

use async_trait::async_trait;

use super::types::ReplyMarkup;
use crate::error::TelegramError;

/// Destination d'une réponse : le chat d'origine, en réponse à un message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTarget {
    pub chat_id: i64,

    /// Message auquel on répond (affiché en citation)
    pub reply_to: Option<i64>,
}

impl ReplyTarget {
    pub fn new(chat_id: i64, reply_to: Option<i64>) -> Self {
        Self { chat_id, reply_to }
    }
}

/// Envoi des réponses du bot
///
/// Aucun état de session : chaque appel est indépendant.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Envoie un texte, éventuellement avec un clavier
    async fn send(
        &self,
        target: ReplyTarget,
        text: &str,
        markup: Option<&ReplyMarkup>,
    ) -> Result<(), TelegramError>;

    /// Acquitte un clic sur un bouton inline
    async fn answer_callback(&self, callback_id: &str) -> Result<(), TelegramError>;
}
