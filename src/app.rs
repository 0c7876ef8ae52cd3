// ============================================================================
// Structure : App
// ============================================================================
// Boucle principale du bot : long polling Telegram + une tâche par événement
//
// CONCEPTS RUST :
// 1. Arc : client et contexte partagés entre la boucle et les tâches
// 2. tokio::select! : attend getUpdates OU le signal d'arrêt
// 3. JoinSet : garde la trace des handlers en cours pour l'arrêt propre
//
// PATTERN : Event Loop
// - À chaque itération :
//   1. Récupérer les événements (getUpdates)
//   2. Lancer un handler par événement (tokio::spawn)
//   3. Nettoyer les handlers terminés
// ============================================================================

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::bot::{dispatch, BotContext, Event};
use crate::error::TelegramError;
use crate::telegram::{TelegramClient, Update};

/// État de la boucle de polling
pub struct App {
    /// Session sortante vers Telegram, partagée avec les handlers
    client: Arc<TelegramClient>,

    /// Contexte immuable des handlers
    context: Arc<BotContext>,

    /// Prochain update_id attendu (confirme les précédents à Telegram)
    offset: i64,

    /// Échecs consécutifs de getUpdates
    consecutive_failures: u32,

    /// Handlers en cours d'exécution
    tasks: JoinSet<()>,

    /// Indique si la boucle doit continuer à tourner
    running: bool,
}

impl App {
    pub fn new(client: Arc<TelegramClient>, context: Arc<BotContext>) -> Self {
        Self {
            client,
            context,
            offset: 0,
            consecutive_failures: 0,
            tasks: JoinSet::new(),
            running: true,
        }
    }

    /// Vérifie si la boucle doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Demande l'arrêt de la boucle
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Exécute la boucle de polling jusqu'à `shutdown` ou un token refusé
    ///
    /// CONCEPT RUST : Future en paramètre générique
    /// - main passe tokio::signal::ctrl_c(), les tests un simple sleep
    /// - tokio::pin! permet de la poller plusieurs fois par référence
    ///
    /// # Erreurs
    /// Seulement si Telegram refuse le token. Les autres échecs sont
    /// retentés indéfiniment avec une pause croissante.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!("Starting bot polling...");

        while self.running {
            // La requête possède son propre Arc : aucun emprunt de self
            let client = Arc::clone(&self.client);
            let offset = self.offset;
            let timeout = self.context.config.telegram.poll_timeout;
            let poll = async move { client.get_updates(offset, timeout).await };

            let outcome = tokio::select! {
                _ = &mut shutdown => None,
                result = poll => Some(result),
            };

            let Some(result) = outcome else {
                info!("Shutdown requested");
                self.quit();
                break;
            };

            // Le signal d'arrêt reste écouté pendant la pause
            if let Some(pause) = self.handle_poll(result)? {
                tokio::select! {
                    _ = &mut shutdown => {
                        info!("Shutdown requested");
                        self.quit();
                    }
                    _ = tokio::time::sleep(pause) => {}
                }
            }

            self.reap_finished();
        }

        Ok(())
    }

    /// Traite le résultat d'un getUpdates
    ///
    /// Retourne la pause à observer avant la prochaine tentative, ou None
    /// si le polling peut reprendre tout de suite.
    fn handle_poll(
        &mut self,
        result: Result<Vec<Update>, TelegramError>,
    ) -> Result<Option<Duration>> {
        match result {
            Ok(updates) => {
                if self.consecutive_failures > 0 {
                    info!(failures = self.consecutive_failures, "Telegram connection restored");
                }
                self.consecutive_failures = 0;
                if !updates.is_empty() {
                    debug!(count = updates.len(), "Received updates");
                }
                for update in updates {
                    self.spawn_handler(update);
                }
                Ok(None)
            }
            Err(e) if e.is_fatal() => {
                error!(error = %e, "Telegram rejected the bot token");
                self.quit();
                Err(anyhow::Error::new(e).context("connection to Telegram refused"))
            }
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                let telegram = &self.context.config.telegram;
                let pause = backoff_delay(
                    telegram.poll_retry_delay,
                    telegram.max_retry_delay,
                    self.consecutive_failures,
                );
                warn!(
                    error = %e,
                    failures = self.consecutive_failures,
                    retry_in_ms = pause.as_millis() as u64,
                    "Polling failed"
                );
                Ok(Some(pause))
            }
        }
    }

    /// Confirme l'update et lance son handler dans une tâche séparée
    fn spawn_handler(&mut self, update: Update) {
        // Avance l'offset même pour les updates ignorés,
        // sinon Telegram les renverrait indéfiniment
        self.offset = self.offset.max(update.update_id + 1);

        let Some(event) = Event::from_update(update) else {
            debug!("Ignoring update without text or payload");
            return;
        };

        let context = Arc::clone(&self.context);
        let client = Arc::clone(&self.client);
        self.tasks.spawn(async move {
            dispatch(&context, &*client, event).await;
        });
    }

    /// Récupère les handlers terminés (et logge ceux qui ont paniqué)
    fn reap_finished(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(e) = result {
                error!(error = %e, "Handler task failed");
            }
        }
    }

    /// Attend la fin des handlers puis ferme la session Telegram
    ///
    /// CONCEPT : Cleanup et RAII
    /// - Appelé par main() même quand run() a échoué
    /// - Arc::try_unwrap réussit une fois que plus aucune tâche ne tient le client
    pub async fn shutdown(mut self) {
        let pending = self.tasks.len();
        if pending > 0 {
            info!(pending, "Waiting for in-flight handlers");
        }
        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "Handler task failed");
            }
        }

        match Arc::try_unwrap(self.client) {
            Ok(client) => client.close(),
            Err(_) => warn!("Telegram session still shared, dropping our handle"),
        }
        info!("Bot stopped");
    }
}

/// Pause avant la tentative suivant le n-ième échec consécutif
///
/// `base`, puis doublée à chaque échec, plafonnée à `max`.
pub fn backoff_delay(base: Duration, max: Duration, failures: u32) -> Duration {
    let exponent = failures.saturating_sub(1).min(16);
    base.saturating_mul(1 << exponent).min(max)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use httpmock::prelude::*;
    use serde_json::json;
    use url::Url;

    use crate::config::{Config, TelegramConfig};

    fn app_for(server: &MockServer, retry_delay: Duration) -> App {
        let config = Config {
            telegram: TelegramConfig {
                token: "42:T".to_string(),
                api_url: Url::parse(&server.base_url()).unwrap(),
                poll_timeout: Duration::from_secs(1),
                poll_retry_delay: retry_delay,
                max_retry_delay: retry_delay * 4,
            },
            news_url: Url::parse(&server.url("/news")).unwrap(),
            quote_delay: Duration::ZERO,
            ..Config::default()
        };
        let client = Arc::new(TelegramClient::new(&config.telegram).unwrap());
        App::new(client, Arc::new(BotContext::new(config)))
    }

    fn start_update(update_id: i64) -> serde_json::Value {
        json!({
            "update_id": update_id,
            "message": {
                "message_id": 1,
                "from": {"id": 5, "first_name": "Eve"},
                "chat": {"id": 5},
                "date": 1700000000,
                "text": "/start"
            }
        })
    }

    fn mock_send_message(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(POST).path("/bot42:T/sendMessage");
            then.status(200).json_body(json!({
                "ok": true,
                "result": {"message_id": 3, "chat": {"id": 5}, "date": 1700000001, "text": "Hello!"}
            }));
        })
    }

    /// Future qui ne se termine jamais : seule une erreur arrête la boucle
    async fn never() {
        std::future::pending::<()>().await
    }

    #[test]
    fn test_backoff_delay() {
        let base = Duration::from_secs(1);
        let max = Duration::from_secs(60);

        assert_eq!(backoff_delay(base, max, 1), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, max, 2), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, max, 4), Duration::from_secs(8));
        assert_eq!(backoff_delay(base, max, 6), Duration::from_secs(32));
        assert_eq!(backoff_delay(base, max, 7), max);
        assert_eq!(backoff_delay(base, max, u32::MAX), max);
    }

    #[tokio::test]
    async fn test_invalid_token_stops_loop() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot42:T/getUpdates");
            then.status(401).json_body(json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized"
            }));
        });

        let mut app = app_for(&server, Duration::ZERO);
        let err = app.run(never()).await.unwrap_err();

        assert!(err.to_string().contains("refused"));
        assert!(!app.is_running());
        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_polling_survives_transient_failures() {
        let server = MockServer::start();
        let mut failing = server.mock(|when, then| {
            when.method(POST).path("/bot42:T/getUpdates");
            then.status(502).body("<html>Bad Gateway</html>");
        });
        let send = mock_send_message(&server);

        let mut app = app_for(&server, Duration::from_millis(5));

        // Telegram revient après 7 échecs : le mock de succès est créé avant
        // la suppression du mock en erreur pour qu'une route existe toujours
        let recovery = async {
            while failing.hits() < 7 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            server.mock(|when, then| {
                when.method(POST).path("/bot42:T/getUpdates");
                then.status(200)
                    .delay(Duration::from_millis(100))
                    .json_body(json!({"ok": true, "result": [start_update(20)]}));
            });
            failing.delete();
            tokio::time::sleep(Duration::from_millis(250)).await;
        };
        app.run(recovery).await.unwrap();

        assert_eq!(app.offset(), 21);
        assert_eq!(app.consecutive_failures, 0);

        app.shutdown().await;
        assert!(send.hits() >= 1);
    }

    #[tokio::test]
    async fn test_shutdown_during_retry_pause() {
        let server = MockServer::start();
        let failing = server.mock(|when, then| {
            when.method(POST).path("/bot42:T/getUpdates");
            then.status(502).body("<html>Bad Gateway</html>");
        });

        // Pause de 30 s après l'échec : seul le signal peut l'interrompre
        let mut app = app_for(&server, Duration::from_secs(30));
        let started = Instant::now();
        app.run(tokio::time::sleep(Duration::from_millis(200)))
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!app.is_running());
        failing.assert_hits(1);
        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_loop() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot42:T/getUpdates");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({"ok": true, "result": []}));
        });

        let mut app = app_for(&server, Duration::ZERO);
        app.run(tokio::time::sleep(Duration::from_millis(50)))
            .await
            .unwrap();

        assert!(!app.is_running());
        assert_eq!(app.offset(), 0);
        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_updates_are_dispatched_and_confirmed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/bot42:T/getUpdates");
            then.status(200)
                .delay(Duration::from_millis(100))
                .json_body(json!({
                    "ok": true,
                    "result": [
                        start_update(10),
                        {
                            "update_id": 11,
                            "message": {"message_id": 2, "chat": {"id": 5}, "date": 1700000000}
                        }
                    ]
                }));
        });
        let send = mock_send_message(&server);

        let mut app = app_for(&server, Duration::ZERO);
        app.run(tokio::time::sleep(Duration::from_millis(150)))
            .await
            .unwrap();

        // L'update ignoré (sans texte) est confirmé lui aussi
        assert_eq!(app.offset(), 12);

        app.shutdown().await;
        assert!(send.hits() >= 1);
    }
}
