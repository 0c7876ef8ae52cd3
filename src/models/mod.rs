// ============================================================================
// Module : models
// ============================================================================
// Structures de données produites par les extracteurs et affichées au bot
//
// Aucune n'a de durée de vie au-delà d'une requête : construites, affichées,
// puis libérées à la fin du handler.
// ============================================================================

pub mod headline; // Titre BBC + lien
pub mod quote;    // Triplet prix / variation / %
pub mod ticker;   // Symbole boursier

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazybot::models::quote::Quote;
// On peut faire : use lazybot::models::Quote;
pub use headline::{link_at, Headline, MAX_HEADLINES, NO_NEWS_TEXT, PLACEHOLDER_LINK};
pub use quote::{Quote, NOT_AVAILABLE};
pub use ticker::{Ticker, DEFAULT_TICKER};
