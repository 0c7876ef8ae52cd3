// ============================================================================
// Client API Telegram Bot
// ============================================================================
// Appels HTTPS JSON vers https://api.telegram.org/bot<token>/<méthode>
//
// CONCEPTS RUST :
// 1. Generics : call<P, T> sérialise P et désérialise ApiResponse<T>
// 2. DeserializeOwned : T ne garde aucune référence vers le corps
// 3. impl Trait for Type : TelegramClient implémente ReplySink
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use super::reply::{ReplySink, ReplyTarget};
use super::types::{
    AnswerCallbackQueryParams, ApiResponse, GetUpdatesParams, Message, NoParams, ReplyMarkup,
    SendMessageParams, Update, User,
};
use crate::config::TelegramConfig;
use crate::error::TelegramError;

/// Marge ajoutée au timeout HTTP par-dessus le long polling
const HTTP_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// Types d'updates demandés à Telegram
const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

/// Connexion sortante vers l'API Telegram
pub struct TelegramClient {
    http: reqwest::Client,
    api_url: Url,
    token: String,
}

impl TelegramClient {
    /// Crée le client HTTP (une seule session pour toute la durée du bot)
    pub fn new(config: &TelegramConfig) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(config.poll_timeout + HTTP_TIMEOUT_MARGIN)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    /// URL d'une méthode : <api>/bot<token>/<method>
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            self.token,
            method
        )
    }

    /// Appelle une méthode de l'API et retourne son `result`
    ///
    /// Telegram renvoie un corps JSON même pour les erreurs 4xx, on lit
    /// donc toujours l'enveloppe avant de regarder le statut.
    async fn call<P, T>(&self, method: &'static str, params: &P) -> Result<T, TelegramError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method, "Calling Telegram API");
        let response = self
            .http
            .post(self.method_url(method))
            .json(params)
            .send()
            .await?;

        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.ok {
            let code = envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16()));
            let description = envelope
                .description
                .unwrap_or_else(|| status.to_string());
            if code == 401 {
                return Err(TelegramError::Unauthorized(description));
            }
            return Err(TelegramError::Api { code, description });
        }

        envelope.result.ok_or(TelegramError::MissingResult(method))
    }

    /// Identité du bot (vérifie aussi le token)
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &NoParams {}).await
    }

    /// Long polling : attend jusqu'à `timeout` de nouveaux événements
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &params).await
    }

    /// Envoie un message texte
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
        reply_markup: Option<&ReplyMarkup>,
    ) -> Result<Message, TelegramError> {
        let params = SendMessageParams {
            chat_id,
            text,
            reply_to_message_id,
            reply_markup,
        };
        self.call("sendMessage", &params).await
    }

    /// Acquitte un clic de bouton inline
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<bool, TelegramError> {
        self.call(
            "answerCallbackQuery",
            &AnswerCallbackQueryParams { callback_query_id },
        )
        .await
    }

    /// Ferme la session HTTP sortante
    ///
    /// CONCEPT RUST : RAII
    /// - Consomme self : le client ne peut plus être utilisé ensuite
    /// - Le drop de reqwest::Client ferme le pool de connexions
    pub fn close(self) {
        info!("Closing Telegram session");
        drop(self.http);
    }
}

#[async_trait]
impl ReplySink for TelegramClient {
    async fn send(
        &self,
        target: ReplyTarget,
        text: &str,
        markup: Option<&ReplyMarkup>,
    ) -> Result<(), TelegramError> {
        let sent = self
            .send_message(target.chat_id, text, target.reply_to, markup)
            .await?;
        debug!(chat_id = target.chat_id, message_id = sent.message_id, "Reply sent");
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TelegramError> {
        if !self.answer_callback_query(callback_id).await? {
            warn!(callback_id, "Callback query was not acknowledged");
        }
        Ok(())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
