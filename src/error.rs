// ============================================================================
// Module : error
// ============================================================================
// Types d'erreurs de la bibliothèque
//
// CONCEPTS RUST :
// 1. thiserror : dérive Display + Error à partir d'attributs
// 2. #[from] : conversion automatique avec l'opérateur ?
// 3. Les erreurs de la lib sont typées, le binaire utilise anyhow
// ============================================================================

use thiserror::Error;

/// Échec de transport lors du téléchargement d'une page
///
/// Ne remonte jamais jusqu'à l'utilisateur : les handlers le convertissent
/// en texte d'affichage (voir `Quote::from_error`, `Headline::load_error`).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Le serveur n'a pas répondu dans le délai imparti
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Réponse HTTP hors 2xx
    #[error("HTTP {status} for url ({url})")]
    Status { status: u16, url: String },

    /// Erreur réseau (DNS, connexion refusée, TLS, corps illisible...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL construite invalide
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// URL de base qui ne peut pas recevoir de segments de chemin
    #[error("cannot build a path under {0}")]
    CannotBeABase(String),
}

/// Erreurs de l'API Telegram Bot
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Erreur HTTP ou de décodage JSON
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// L'API a répondu `ok: false`
    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },

    /// Token refusé par Telegram
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// `ok: true` mais pas de champ `result`
    #[error("missing result in {0} response")]
    MissingResult(&'static str),
}

impl TelegramError {
    /// Vrai si l'erreur rend la connexion à Telegram irrécupérable
    ///
    /// Un token invalide donne 401 (ou 404 quand le chemin /bot<token>/
    /// n'existe pas) : inutile de continuer à interroger l'API.
    pub fn is_fatal(&self) -> bool {
        match self {
            TelegramError::Unauthorized(_) => true,
            TelegramError::Api { code, .. } => matches!(code, 401 | 404),
            _ => false,
        }
    }
}

/// Erreurs de chargement de la configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status {
            status: 503,
            url: "https://www.bbc.com/news".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 for url (https://www.bbc.com/news)");

        let err = FetchError::Timeout {
            url: "https://finance.yahoo.com/quote/AAPL/".to_string(),
        };
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_telegram_error_is_fatal() {
        assert!(TelegramError::Unauthorized("bad token".into()).is_fatal());
        assert!(TelegramError::Api {
            code: 404,
            description: "Not Found".into()
        }
        .is_fatal());
        assert!(!TelegramError::Api {
            code: 409,
            description: "Conflict".into()
        }
        .is_fatal());
        assert!(!TelegramError::MissingResult("getUpdates").is_fatal());
    }
}
