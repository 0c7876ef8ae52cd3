// ============================================================================
// Extracteur : BBC News
// ============================================================================
// Récupère les titres de la page d'accueil https://www.bbc.com/news
//
// Chaque carte de news contient un <h2 data-testid="card-headline">, placé
// à l'intérieur du lien <a href="/news/articles/..."> vers l'article.
//
// CONCEPTS RUST :
// 1. scraper : sélecteurs CSS sur un DOM parsé par html5ever
// 2. Lifetimes : les ElementRef<'a> empruntent le document
// 3. Iterators : filter_map / take / collect
// ============================================================================

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::fetcher::HttpFetcher;
use crate::error::FetchError;
use crate::models::{Headline, MAX_HEADLINES, PLACEHOLDER_LINK};

/// Marqueur d'un titre de carte sur la page BBC
pub const HEADLINE_SELECTOR: &str = r#"h2[data-testid="card-headline"]"#;

/// Télécharge la page de news et en extrait les titres
///
/// Ne retourne jamais une liste vide en cas de succès (voir
/// `extract_headlines`). L'erreur de transport est laissée à l'appelant.
#[instrument(skip(fetcher), fields(url = %news_url))]
pub async fn fetch_headlines(
    fetcher: &HttpFetcher,
    news_url: &Url,
) -> Result<Vec<Headline>, FetchError> {
    info!("Fetching news");
    let html = fetcher.fetch(news_url).await?;
    let headlines = extract_headlines(&html, news_url);
    info!(count = headlines.len(), "Found headlines");
    Ok(headlines)
}

/// Extrait jusqu'à 5 titres d'une page BBC
///
/// - Le texte est nettoyé (trim), les titres vides sont ignorés
/// - Le lien vient du <a> ancêtre le plus proche, résolu contre `base`
/// - Sans lien : "#"
/// - Aucun titre : un seul enregistrement "No news found"
///
/// Le HTML malformé ne provoque jamais d'erreur : html5ever répare ce qu'il
/// peut, et ce qui reste introuvable compte comme zéro titre.
pub fn extract_headlines(html: &str, base: &Url) -> Vec<Headline> {
    let selector = match Selector::parse(HEADLINE_SELECTOR) {
        Ok(selector) => selector,
        Err(e) => {
            warn!(error = %e, "Invalid headline selector");
            return vec![Headline::no_news()];
        }
    };

    let document = Html::parse_document(html);

    let headlines: Vec<Headline> = document
        .select(&selector)
        .filter_map(|element| {
            let text = element.text().collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                debug!("Skipping empty headline");
                return None;
            }
            let link = enclosing_href(element)
                .and_then(|href| resolve_link(base, href))
                .unwrap_or_else(|| PLACEHOLDER_LINK.to_string());
            Some(Headline::new(text, link))
        })
        .take(MAX_HEADLINES)
        .collect();

    if headlines.is_empty() {
        warn!("No headline found in page");
        return vec![Headline::no_news()];
    }

    headlines
}

/// Cherche l'attribut href du <a> ancêtre le plus proche
///
/// CONCEPT RUST : Lifetime explicite
/// - Le &str retourné pointe dans le document parsé
/// - 'a relie la durée de vie du résultat à celle de l'élément
fn enclosing_href<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "a")
        .and_then(|anchor| anchor.value().attr("href"))
}

/// Résout un href (relatif ou absolu) contre l'URL de la page
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            debug!(href, error = %e, "Unresolvable headline link");
            None
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
