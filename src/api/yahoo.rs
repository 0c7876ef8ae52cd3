// ============================================================================
// Extracteur : Yahoo Finance
// ============================================================================
// Récupère prix, variation et variation en % depuis la page de cotation
// https://finance.yahoo.com/quote/<TICKER>/
//
// CONCEPTS RUST :
// 1. async/await + tokio::time::sleep : pause non-bloquante avant la requête
// 2. Option<T> : un champ manquant est un cas normal, pas une erreur
// 3. Pattern matching sur un tuple d'Options : tout-ou-rien
// ============================================================================

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::fetcher::HttpFetcher;
use crate::error::FetchError;
use crate::models::{Quote, Ticker};

/// Sélecteurs des trois champs de la cotation
pub const PRICE_SELECTOR: &str = r#"span[data-testid="qsp-price"]"#;
pub const CHANGE_SELECTOR: &str = r#"span[data-testid="qsp-price-change"]"#;
pub const PERCENT_SELECTOR: &str = r#"span[data-testid="qsp-price-change-percent"]"#;

/// Télécharge la page de cotation d'un ticker et extrait la cotation
///
/// CONCEPT : Throttle minimal
/// - `delay` est appliqué avant CHAQUE requête (2s par défaut)
/// - Pas d'historique des requêtes, pas d'adaptation
///
/// # Arguments
/// * `fetcher` - client de téléchargement
/// * `base` - préfixe des pages de cotation (ex: https://finance.yahoo.com/quote/)
/// * `ticker` - symbole demandé
/// * `delay` - pause avant la requête
#[instrument(skip(fetcher, base, delay), fields(ticker = %ticker))]
pub async fn fetch_quote(
    fetcher: &HttpFetcher,
    base: &Url,
    ticker: &Ticker,
    delay: Duration,
) -> Result<Quote, FetchError> {
    let url = quote_url(base, ticker)?;
    info!(url = %url, "Fetching stock data");

    // Délai pour éviter les limitations de Yahoo
    if !delay.is_zero() {
        debug!(delay_ms = delay.as_millis() as u64, "Waiting before quote request");
        tokio::time::sleep(delay).await;
    }

    let html = fetcher.fetch(&url).await?;
    Ok(extract_quote(&html))
}

/// Construit l'URL de la page de cotation
///
/// Le ticker est ajouté comme segment de chemin (encodé si besoin),
/// suivi d'un slash final : /quote/TSLA/
pub fn quote_url(base: &Url, ticker: &Ticker) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::CannotBeABase(base.to_string()))?
        .pop_if_empty()
        .push(ticker.as_str())
        .push("");
    Ok(url)
}

/// Extrait la cotation d'une page Yahoo
///
/// Si l'un des trois champs manque, retourne le triplet "N/A" complet :
/// jamais de données partielles.
pub fn extract_quote(html: &str) -> Quote {
    match parse_quote(html) {
        Some(quote) => {
            debug!(price = %quote.price, change = %quote.change, percent = %quote.percent, "Parsed quote");
            quote
        }
        None => {
            warn!("Some stock data missing");
            Quote::unavailable()
        }
    }
}

/// Lit les trois champs, None si l'un d'eux est absent
fn parse_quote(html: &str) -> Option<Quote> {
    let document = Html::parse_document(html);

    // CONCEPT RUST : Pattern matching sur tuple
    // - Les trois doivent être Some pour construire la Quote
    match (
        first_text(&document, PRICE_SELECTOR),
        first_text(&document, CHANGE_SELECTOR),
        first_text(&document, PERCENT_SELECTOR),
    ) {
        (Some(price), Some(change), Some(percent)) => Some(Quote::new(price, change, percent)),
        _ => None,
    }
}

/// Texte du premier élément correspondant au sélecteur
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

// ============================================================================
// Tests unitaires
// ============================================================================
