// ============================================================================
// Structure : Headline
// ============================================================================
// Un titre extrait de la page d'accueil BBC News, avec son lien
//
// CONCEPTS RUST :
// 1. Constantes : les valeurs sentinelles sont des &'static str
// 2. impl Display en paramètre : accepte n'importe quelle erreur affichable
// 3. Slices : &[Headline] plutôt que &Vec<Headline>
// ============================================================================

use std::fmt::Display;

/// Lien utilisé quand aucun lien n'a pu être trouvé
pub const PLACEHOLDER_LINK: &str = "#";

/// Texte de l'enregistrement synthétique quand la page ne contient aucun titre
pub const NO_NEWS_TEXT: &str = "No news found";

/// Nombre maximum de titres gardés par requête
pub const MAX_HEADLINES: usize = 5;

/// Un titre de news et son lien
///
/// Construit à chaque requête, jamais persisté. L'index dans la liste sert
/// de payload aux boutons "Read more" (`news_<i>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    /// Texte du titre, sans espaces en début/fin
    pub text: String,

    /// URL absolue de l'article, ou "#" si introuvable
    pub link: String,
}

impl Headline {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }

    /// Enregistrement synthétique "No news found"
    pub fn no_news() -> Self {
        Self::new(NO_NEWS_TEXT, PLACEHOLDER_LINK)
    }

    /// Enregistrement affiché quand le téléchargement a échoué
    pub fn load_error(error: &impl Display) -> Self {
        Self::new(format!("Error loading news: {}", error), PLACEHOLDER_LINK)
    }
}

/// Retourne le lien du titre à l'index donné
///
/// None pour un index hors limites (callback périmé ou forgé).
pub fn link_at(headlines: &[Headline], index: usize) -> Option<&str> {
    headlines.get(index).map(|h| h.link.as_str())
}
