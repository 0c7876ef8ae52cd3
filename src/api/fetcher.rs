// ============================================================================
// Remote Fetcher
// ============================================================================
// Télécharge une page HTML avec un User-Agent de navigateur et un timeout
//
// CONCEPTS RUST :
// 1. async/await : la requête suspend la tâche, pas le thread
// 2. Result<T, FetchError> : erreur typée, classée par cause
// 3. #[instrument] : span tracing avec l'URL demandée
// ============================================================================

use std::time::Duration;

use tracing::{debug, error, info, instrument};
use url::Url;

use crate::error::FetchError;

/// Client de téléchargement des pages scrapées
///
/// Ne garde que la configuration : chaque appel construit son propre
/// client HTTP, aucune connexion n'est partagée entre deux requêtes.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Télécharge `url` et retourne le corps de la réponse
    ///
    /// # Erreurs
    /// * `FetchError::Timeout` - pas de réponse complète dans le délai
    /// * `FetchError::Status` - statut HTTP hors 2xx
    /// * `FetchError::Network` - connexion, DNS, TLS, corps illisible
    ///
    /// Aucune nouvelle tentative n'est faite.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        info!("Fetching page");

        debug!("Creating HTTP client");
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()?;

        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        // Vérifie que la réponse est un succès HTTP (200-299)
        if !status.is_success() {
            error!(status = %status, "Remote site returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| classify(e, url))?;
        debug!(bytes = body.len(), "Downloaded page body");
        Ok(body)
    }
}

/// Sépare les timeouts des autres erreurs réseau
fn classify(err: reqwest::Error, url: &Url) -> FetchError {
    if err.is_timeout() {
        error!(error = %err, "Request timed out");
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        error!(error = %err, "Request failed");
        FetchError::Network(err)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BROWSER_USER_AGENT;
    use httpmock::prelude::*;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(BROWSER_USER_AGENT, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/news")
                .header("user-agent", BROWSER_USER_AGENT);
            then.status(200).body("<html>ok</html>");
        });

        let url = Url::parse(&server.url("/news")).unwrap();
        let body = fetcher().fetch(&url).await.unwrap();

        mock.assert();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quote/AAPL/");
            then.status(404).body("not here");
        });

        let url = Url::parse(&server.url("/quote/AAPL/")).unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();

        match err {
            FetchError::Status { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/quote/AAPL/"));
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(3)).body("late");
        });

        let fetcher = HttpFetcher::new(BROWSER_USER_AGENT, Duration::from_millis(200));
        let url = Url::parse(&server.url("/slow")).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Timeout { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Port 9 (discard) : personne n'écoute en local
        let url = Url::parse("http://127.0.0.1:9/news").unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_) | FetchError::Timeout { .. }));
    }
}
