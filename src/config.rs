// ============================================================================
// Module : config
// ============================================================================
// Configuration du bot : token Telegram, URLs des sites, délais
//
// CONCEPTS RUST :
// 1. Default : valeurs par défaut identiques aux constantes historiques
// 2. Closures en paramètre : from_lookup(|key| ...) rend la lecture testable
//    sans toucher aux variables d'environnement du process
// 3. La config est construite une fois au démarrage puis jamais modifiée
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::models::Ticker;

/// User-Agent de navigateur envoyé aux sites scrapés
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
const DEFAULT_NEWS_URL: &str = "https://www.bbc.com/news";
const DEFAULT_QUOTE_URL: &str = "https://finance.yahoo.com/quote/";

/// Connexion à l'API Telegram Bot
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Token donné par BotFather
    pub token: String,

    /// Racine de l'API (remplacée par un serveur simulé dans les tests)
    pub api_url: Url,

    /// Durée du long polling de getUpdates
    pub poll_timeout: Duration,

    /// Première pause après un échec de getUpdates (doublée à chaque échec)
    pub poll_retry_delay: Duration,

    /// Plafond de la pause entre deux tentatives
    pub max_retry_delay: Duration,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: parse_default(DEFAULT_TELEGRAM_API),
            poll_timeout: Duration::from_secs(30),
            poll_retry_delay: Duration::from_secs(1),
            max_retry_delay: Duration::from_secs(60),
        }
    }
}

/// Configuration complète du bot
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,

    /// Page d'accueil des news (sert aussi de base pour les liens relatifs)
    pub news_url: Url,

    /// Préfixe des pages de cotation, le ticker est ajouté comme segment
    pub quote_base_url: Url,

    /// User-Agent envoyé aux deux sites
    pub user_agent: String,

    /// Timeout de chaque téléchargement de page
    pub fetch_timeout: Duration,

    /// Pause imposée avant chaque téléchargement de cotation
    pub quote_delay: Duration,

    /// Ticker utilisé pour "/stocks" et "Stocks" sans argument
    pub default_ticker: Ticker,

    /// Répertoire des fichiers de logs
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig::default(),
            news_url: parse_default(DEFAULT_NEWS_URL),
            quote_base_url: parse_default(DEFAULT_QUOTE_URL),
            user_agent: BROWSER_USER_AGENT.to_string(),
            fetch_timeout: Duration::from_secs(10),
            quote_delay: Duration::from_secs(2),
            default_ticker: Ticker::default(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Charge la configuration depuis les variables d'environnement
    ///
    /// Seul TELEGRAM_BOT_TOKEN est obligatoire.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Charge la configuration à partir d'une fonction de lecture clé -> valeur
    ///
    /// CONCEPT RUST : Generics avec trait bound Fn
    /// - F peut être une closure, une fonction, ...
    /// - Les tests passent une HashMap au lieu de l'environnement réel
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        config.telegram.token = lookup("TELEGRAM_BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar("TELEGRAM_BOT_TOKEN"))?;

        if let Some(url) = read_url(&lookup, "TELEGRAM_API_URL")? {
            config.telegram.api_url = url;
        }
        if let Some(secs) = read_number(&lookup, "LAZYBOT_POLL_TIMEOUT_SECS")? {
            config.telegram.poll_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = read_number(&lookup, "LAZYBOT_MAX_RETRY_DELAY_SECS")? {
            // Jamais en dessous de la première pause
            config.telegram.max_retry_delay =
                Duration::from_secs(secs).max(config.telegram.poll_retry_delay);
        }
        if let Some(url) = read_url(&lookup, "LAZYBOT_NEWS_URL")? {
            config.news_url = url;
        }
        if let Some(url) = read_url(&lookup, "LAZYBOT_QUOTE_URL")? {
            config.quote_base_url = url;
        }
        if let Some(raw) = lookup("LAZYBOT_DEFAULT_TICKER") {
            config.default_ticker = Ticker::new(&raw).ok_or(ConfigError::Empty {
                var: "LAZYBOT_DEFAULT_TICKER",
            })?;
        }
        if let Some(secs) = read_number(&lookup, "LAZYBOT_FETCH_TIMEOUT_SECS")? {
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = read_number(&lookup, "LAZYBOT_QUOTE_DELAY_MS")? {
            config.quote_delay = Duration::from_millis(ms);
        }
        if let Some(dir) = lookup("LAZYBOT_LOG_DIR").filter(|d| !d.is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

/// Répertoire de logs par défaut
///
/// - Linux/WSL : ~/.local/share/lazybot/logs
/// - macOS : ~/Library/Application Support/lazybot/logs
/// - Sinon : ./logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazybot").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

// Les URLs par défaut sont des littéraux valides.
fn parse_default(raw: &str) -> Url {
    Url::parse(raw).unwrap_or_else(|e| panic!("invalid built-in URL {raw}: {e}"))
}

fn read_url<F>(lookup: &F, var: &'static str) -> Result<Option<Url>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { var, source }))
        .transpose()
}

fn read_number<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { var, value: raw })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "123:abc")])).unwrap();

        assert_eq!(config.telegram.token, "123:abc");
        assert_eq!(config.news_url.as_str(), "https://www.bbc.com/news");
        assert_eq!(config.quote_base_url.as_str(), "https://finance.yahoo.com/quote/");
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.quote_delay, Duration::from_secs(2));
        assert_eq!(config.default_ticker.as_str(), "AAPL");
        assert_eq!(config.telegram.poll_retry_delay, Duration::from_secs(1));
        assert_eq!(config.telegram.max_retry_delay, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("TELEGRAM_BOT_TOKEN")));

        let err = Config::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("LAZYBOT_DEFAULT_TICKER", "msft"),
            ("LAZYBOT_QUOTE_DELAY_MS", "0"),
            ("LAZYBOT_NEWS_URL", "http://localhost:8080/news"),
            ("LAZYBOT_MAX_RETRY_DELAY_SECS", "0"),
            ("LAZYBOT_LOG_DIR", "/tmp/lazybot-logs"),
        ]))
        .unwrap();

        assert_eq!(config.default_ticker.as_str(), "MSFT");
        assert_eq!(config.quote_delay, Duration::ZERO);
        assert_eq!(config.news_url.as_str(), "http://localhost:8080/news");
        assert_eq!(config.telegram.max_retry_delay, Duration::from_secs(1));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/lazybot-logs"));
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("LAZYBOT_FETCH_TIMEOUT_SECS", "ten"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "LAZYBOT_FETCH_TIMEOUT_SECS", .. }));

        let err = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("LAZYBOT_QUOTE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
