// ============================================================================
// Claviers du bot
// ============================================================================
// - Menu principal : clavier persistant News / Stocks / Refresh
// - Liste de news : un bouton "Read more i" par titre + "Back"
// - Cotation : un seul bouton "Back"
// ============================================================================

use super::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup, ReplyMarkup,
};

/// Payload du bouton "Back"
pub const BACK_PAYLOAD: &str = "back";

/// Préfixe des payloads "Read more" (suivi de l'index du titre)
pub const NEWS_PAYLOAD_PREFIX: &str = "news_";

/// Clavier persistant du menu principal
///
/// ```text
/// [ News ] [ Stocks ]
/// [     Refresh     ]
/// ```
pub fn main_menu() -> ReplyMarkup {
    let button = |text: &str| KeyboardButton {
        text: text.to_string(),
    };

    ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
        keyboard: vec![
            vec![button("News"), button("Stocks")],
            vec![button("Refresh")],
        ],
        resize_keyboard: true,
    })
}

/// Boutons "Read more 1..n" puis "Back", un par ligne
pub fn news_keyboard(count: usize) -> ReplyMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = (0..count)
        .map(|index| {
            vec![InlineKeyboardButton {
                text: format!("Read more {}", index + 1),
                callback_data: news_payload(index),
            }]
        })
        .collect();
    rows.push(vec![back_button()]);

    ReplyMarkup::Inline(InlineKeyboardMarkup {
        inline_keyboard: rows,
    })
}

/// Clavier inline avec le seul bouton "Back"
pub fn back_keyboard() -> ReplyMarkup {
    ReplyMarkup::Inline(InlineKeyboardMarkup {
        inline_keyboard: vec![vec![back_button()]],
    })
}

/// Payload du bouton "Read more" pour l'index donné (0-based)
pub fn news_payload(index: usize) -> String {
    format!("{}{}", NEWS_PAYLOAD_PREFIX, index)
}

fn back_button() -> InlineKeyboardButton {
    InlineKeyboardButton {
        text: "Back".to_string(),
        callback_data: BACK_PAYLOAD.to_string(),
    }
}
