// ============================================================================
// Rendu des réponses
// ============================================================================
// Textes envoyés par le bot
// ============================================================================

use crate::models::{Headline, Quote, Ticker};

pub const GREETING: &str =
    "Hello! I'm a bot for BBC news and stocks. Use /news or /stocks <ticker> (e.g., /stocks TSLA)!";
pub const REFRESHING: &str = "Refreshing news...";
pub const NEWS_NOT_FOUND: &str = "News not found.";
pub const BACK_TO_MENU: &str = "Back to main menu!";

/// Liste numérotée des titres
///
/// ```text
/// Latest BBC News:
///
/// 1. Premier titre
/// 2. Deuxième titre
/// ```
pub fn news_text(headlines: &[Headline]) -> String {
    let lines: Vec<String> = headlines
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{}. {}", i + 1, h.text))
        .collect();
    format!("Latest BBC News:\n\n{}", lines.join("\n"))
}

/// Accusé de réception avant une cotation
pub fn fetching_text(ticker: &Ticker) -> String {
    format!("Fetching stock data for {}...", ticker)
}

pub fn quote_text(ticker: &Ticker, quote: &Quote) -> String {
    format!(
        "{} Stock:\nPrice: {} USD\nChange: {} USD\nPercent: {}",
        ticker, quote.price, quote.change, quote.percent
    )
}

pub fn link_text(link: &str) -> String {
    format!("Link to the news:\n{}", link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_text() {
        let text = news_text(&[
            Headline::new("Alpha", "https://www.bbc.com/a"),
            Headline::new("Beta", "#"),
        ]);
        assert_eq!(text, "Latest BBC News:\n\n1. Alpha\n2. Beta");
    }

    #[test]
    fn test_quote_text() {
        let ticker = Ticker::new("tsla").unwrap();
        let text = quote_text(&ticker, &Quote::unavailable());
        assert_eq!(text, "TSLA Stock:\nPrice: N/A USD\nChange: N/A USD\nPercent: N/A");
        assert_eq!(fetching_text(&ticker), "Fetching stock data for TSLA...");
    }
}
