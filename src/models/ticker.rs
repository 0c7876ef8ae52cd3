// ============================================================================
// Structure : Ticker
// ============================================================================
// Représente un symbole boursier saisi par l'utilisateur (ex: "TSLA")
//
// CONCEPTS RUST :
// 1. Newtype pattern : Ticker(String) plutôt qu'un String nu
//    - Le type garantit que le symbole est déjà en majuscules
//    - Impossible de confondre un ticker avec un autre texte
//
// 2. Trait Display : permet format!("{}", ticker)
// ============================================================================

use std::fmt;

/// Symbole utilisé quand l'utilisateur n'en donne pas
pub const DEFAULT_TICKER: &str = "AAPL";

/// Symbole boursier en majuscules
///
/// Aucune validation contre une liste de symboles connus : Yahoo décidera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker(String);

impl Ticker {
    /// Crée un ticker, converti en majuscules
    ///
    /// Retourne None pour une chaîne vide (ou uniquement des espaces).
    pub fn new(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            None
        } else {
            Some(Self(symbol.to_uppercase()))
        }
    }

    /// Extrait le ticker d'une commande "/stocks tsla" ou "Stocks"
    ///
    /// CONCEPT RUST : split_once
    /// - Le premier mot est la commande elle-même
    /// - Tout le reste (plusieurs mots compris) forme le ticker
    ///
    /// # Exemple
    /// Ticker::from_command("/stocks tsla", &default)  -> TSLA
    /// Ticker::from_command("/stocks brk b", &default) -> BRK B
    /// Ticker::from_command("Stocks", &default)        -> default
    pub fn from_command(text: &str, default: &Ticker) -> Self {
        text.trim()
            .split_once(char::is_whitespace)
            .and_then(|(_, rest)| Ticker::new(rest))
            .unwrap_or_else(|| default.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self(DEFAULT_TICKER.to_string())
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
