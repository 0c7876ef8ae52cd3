// ============================================================================
// Types de l'API Telegram Bot
// ============================================================================
// Sous-ensemble des objets JSON de https://core.telegram.org/bots/api
// utilisés par le bot : Update, Message, CallbackQuery, claviers
//
// CONCEPTS RUST :
// 1. Serde derive : JSON <-> structs sans code de parsing manuel
// 2. #[serde(default)] / Option<T> : champs absents du JSON
// 3. #[serde(untagged)] : enum sérialisé comme son contenu
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Enveloppe commune à toutes les réponses de l'API
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

/// Un événement reçu par getUpdates
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,

    /// Date d'envoi (timestamp Unix côté API)
    /// CONCEPT : chrono::serde::ts_seconds convertit i64 <-> DateTime<Utc>
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,

    pub text: Option<String>,
}

/// Clic sur un bouton de clavier inline
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,

    /// Message portant le bouton (absent s'il est trop ancien)
    pub message: Option<Message>,

    /// Payload `callback_data` du bouton
    pub data: Option<String>,
}

// ============================================================================
// Claviers
// ============================================================================

/// Bouton d'un clavier de réponse : envoie son texte comme message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

/// Clavier persistant affiché à la place du clavier système
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
}

/// Bouton inline : renvoie `callback_data` au bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

/// Clavier attaché sous un message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// `reply_markup` d'un message envoyé
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Inline(InlineKeyboardMarkup),
}

// ============================================================================
// Paramètres des méthodes
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdatesParams<'a> {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageParams<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<&'a ReplyMarkup>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnswerCallbackQueryParams<'a> {
    pub callback_query_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NoParams {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_message_update() {
        let raw = json!({
            "update_id": 1001,
            "message": {
                "message_id": 7,
                "from": {"id": 42, "is_bot": false, "first_name": "Ada"},
                "chat": {"id": 42, "type": "private"},
                "date": 1700000000,
                "text": "/stocks tsla"
            }
        });

        let update: Update = serde_json::from_value(raw).unwrap();
        let message = update.message.unwrap();

        assert_eq!(update.update_id, 1001);
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("/stocks tsla"));
        assert_eq!(message.date.timestamp(), 1_700_000_000);
        assert!(update.callback_query.is_none());
    }

    #[test]
    fn test_deserialize_callback_update() {
        let raw = json!({
            "update_id": 1002,
            "callback_query": {
                "id": "cbq-1",
                "from": {"id": 42, "is_bot": false, "first_name": "Ada"},
                "message": {
                    "message_id": 8,
                    "chat": {"id": 42, "type": "private"},
                    "date": 1700000001,
                    "text": "Latest BBC News:"
                },
                "chat_instance": "abc",
                "data": "news_2"
            }
        });

        let update: Update = serde_json::from_value(raw).unwrap();
        let query = update.callback_query.unwrap();

        assert_eq!(query.id, "cbq-1");
        assert_eq!(query.data.as_deref(), Some("news_2"));
        assert_eq!(query.message.unwrap().message_id, 8);
    }

    #[test]
    fn test_serialize_send_message() {
        let markup = ReplyMarkup::Inline(InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: "Back".into(),
                callback_data: "back".into(),
            }]],
        });
        let params = SendMessageParams {
            chat_id: 42,
            text: "hi",
            reply_to_message_id: None,
            reply_markup: Some(&markup),
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "chat_id": 42,
                "text": "hi",
                "reply_markup": {"inline_keyboard": [[{"text": "Back", "callback_data": "back"}]]}
            })
        );
    }
}
