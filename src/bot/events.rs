// ============================================================================
// Événements entrants
// ============================================================================
// Convertit les Update Telegram en événements du bot
//
// CONCEPTS RUST :
// 1. Enums avec données : Message et Callback portent des champs différents
// 2. Option + ? : un update sans contenu utile donne None
// 3. Ownership : from_update consomme l'Update (pas de clone des textes)
// ============================================================================

use crate::telegram::{ReplyTarget, Update};

/// Événement traité par le routeur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Message texte (commande ou bouton du clavier persistant)
    Message {
        user_id: i64,
        chat_id: i64,
        message_id: i64,
        text: String,
    },

    /// Clic sur un bouton inline
    Callback {
        user_id: i64,
        callback_id: String,

        /// Chat et message portant le bouton, None si le message est
        /// devenu inaccessible
        origin: Option<ReplyTarget>,

        data: String,
    },
}

impl Event {
    /// Extrait l'événement d'un Update
    ///
    /// Retourne None pour les messages sans texte (photos, stickers...) et
    /// les callbacks sans payload.
    pub fn from_update(update: Update) -> Option<Self> {
        if let Some(message) = update.message {
            let text = message.text?;
            // Dans un chat privé, l'expéditeur est le chat lui-même
            let user_id = message.from.map(|u| u.id).unwrap_or(message.chat.id);
            return Some(Event::Message {
                user_id,
                chat_id: message.chat.id,
                message_id: message.message_id,
                text,
            });
        }

        if let Some(query) = update.callback_query {
            let data = query.data?;
            let origin = query
                .message
                .map(|m| ReplyTarget::new(m.chat.id, Some(m.message_id)));
            return Some(Event::Callback {
                user_id: query.from.id,
                callback_id: query.id,
                origin,
                data,
            });
        }

        None
    }

    /// Identifiant de l'utilisateur à l'origine de l'événement
    pub fn user_id(&self) -> i64 {
        match self {
            Event::Message { user_id, .. } | Event::Callback { user_id, .. } => *user_id,
        }
    }

    /// Texte du message, None pour un callback
    pub fn text(&self) -> Option<&str> {
        match self {
            Event::Message { text, .. } => Some(text),
            Event::Callback { .. } => None,
        }
    }

    /// Payload du bouton, None pour un message
    pub fn callback_data(&self) -> Option<&str> {
        match self {
            Event::Callback { data, .. } => Some(data),
            Event::Message { .. } => None,
        }
    }

    /// Où répondre : au message lui-même, ou au message portant le bouton
    pub fn reply_target(&self) -> Option<ReplyTarget> {
        match self {
            Event::Message {
                chat_id,
                message_id,
                ..
            } => Some(ReplyTarget::new(*chat_id, Some(*message_id))),
            Event::Callback { origin, .. } => *origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(value: serde_json::Value) -> Update {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_message_event() {
        let event = Event::from_update(update(json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "from": {"id": 42, "is_bot": false, "first_name": "Ada"},
                "chat": {"id": 420},
                "date": 1700000000,
                "text": "News"
            }
        })))
        .unwrap();

        assert_eq!(event.user_id(), 42);
        assert_eq!(event.text(), Some("News"));
        assert_eq!(event.reply_target(), Some(ReplyTarget::new(420, Some(10))));
    }

    #[test]
    fn test_callback_event() {
        let event = Event::from_update(update(json!({
            "update_id": 2,
            "callback_query": {
                "id": "cb",
                "from": {"id": 42, "first_name": "Ada"},
                "message": {"message_id": 11, "chat": {"id": 420}, "date": 1700000000},
                "data": "back"
            }
        })))
        .unwrap();

        assert_eq!(event.callback_data(), Some("back"));
        assert_eq!(event.text(), None);
        assert_eq!(event.reply_target(), Some(ReplyTarget::new(420, Some(11))));
    }

    #[test]
    fn test_ignored_updates() {
        // Photo sans légende
        assert!(Event::from_update(update(json!({
            "update_id": 3,
            "message": {"message_id": 1, "chat": {"id": 1}, "date": 1700000000}
        })))
        .is_none());

        // Callback sans payload
        assert!(Event::from_update(update(json!({
            "update_id": 4,
            "callback_query": {"id": "x", "from": {"id": 1}}
        })))
        .is_none());

        // Type d'update inconnu
        assert!(Event::from_update(update(json!({"update_id": 5}))).is_none());
    }
}
