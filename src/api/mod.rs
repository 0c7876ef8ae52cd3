// ============================================================================
// Module : api
// ============================================================================
// Téléchargement et extraction des deux sites scrapés :
// - BBC News (titres + liens)
// - Yahoo Finance (cotation d'un ticker)
// ============================================================================

pub mod bbc;     // Extracteur BBC News
pub mod fetcher; // Client HTTP (User-Agent + timeout)
pub mod yahoo;   // Extracteur Yahoo Finance

// Re-export des fonctions principales
pub use bbc::{extract_headlines, fetch_headlines};
pub use fetcher::HttpFetcher;
pub use yahoo::{extract_quote, fetch_quote, quote_url};
