// ============================================================================
// Structure : Quote
// ============================================================================
// Cotation affichée pour un ticker : prix, variation, variation en %
//
// Les trois champs sont des chaînes d'affichage, copiées telles quelles
// depuis la page Yahoo. Aucun parsing numérique.
// ============================================================================

use std::fmt::Display;

/// Valeur sentinelle pour un champ indisponible
pub const NOT_AVAILABLE: &str = "N/A";

/// Triplet prix / variation / pourcentage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Prix (ex: "185.23"), ou message d'erreur si le fetch a échoué
    pub price: String,

    /// Variation absolue (ex: "+2.34")
    pub change: String,

    /// Variation en pourcentage (ex: "(+1.28%)")
    pub percent: String,
}

impl Quote {
    pub fn new(
        price: impl Into<String>,
        change: impl Into<String>,
        percent: impl Into<String>,
    ) -> Self {
        Self {
            price: price.into(),
            change: change.into(),
            percent: percent.into(),
        }
    }

    /// Triplet "N/A" : au moins un champ manquait sur la page
    ///
    /// CONCEPT : Tout-ou-rien
    /// - On ne renvoie jamais un mélange de vraies valeurs et de "N/A"
    pub fn unavailable() -> Self {
        Self::new(NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE)
    }

    /// Cotation affichée quand la page n'a pas pu être téléchargée
    pub fn from_error(error: &impl Display) -> Self {
        Self::new(format!("Error: {}", error), NOT_AVAILABLE, NOT_AVAILABLE)
    }
}
