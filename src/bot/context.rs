// ============================================================================
// Contexte du bot
// ============================================================================
// Construit une fois au démarrage, puis partagé en lecture seule par toutes
// les tâches via Arc<BotContext>
//
// CONCEPT RUST : Immutabilité partagée
// - Aucun champ mutable, aucun Mutex
// - Arc suffit : plusieurs tâches lisent le même contexte en parallèle
// ============================================================================

use crate::api::HttpFetcher;
use crate::config::Config;

use super::router::Router;

/// Tout ce dont un handler a besoin, hors transport Telegram
#[derive(Debug, Clone)]
pub struct BotContext {
    pub config: Config,
    pub fetcher: HttpFetcher,
    pub router: Router,
}

impl BotContext {
    pub fn new(config: Config) -> Self {
        let fetcher = HttpFetcher::new(config.user_agent.clone(), config.fetch_timeout);
        let router = Router::new(config.default_ticker.clone());
        Self {
            config,
            fetcher,
            router,
        }
    }
}
