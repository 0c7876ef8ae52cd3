// ============================================================================
// Command Router
// ============================================================================
// Associe chaque événement entrant à une route, dans un ordre fixe
//
// CONCEPTS RUST :
// 1. Pointeurs de fonction : fn(&Router, &Event) -> Option<Route>
// 2. Table statique : &[(nom, matcher)] évaluée de haut en bas
// 3. Iterator::find_map : la première route qui correspond gagne
// ============================================================================

use crate::models::Ticker;
use crate::telegram::keyboards::{BACK_PAYLOAD, NEWS_PAYLOAD_PREFIX};

use super::events::Event;

/// Action à exécuter pour un événement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// "/start" : message d'accueil + menu
    Start,

    /// "/news", "News", "Refresh"
    News { refresh: bool },

    /// "/stocks [ticker]", "Stocks"
    Stocks { ticker: Ticker },

    /// Bouton "news_<i>" ; None si l'index n'est pas un entier valide
    ReadMore { index: Option<usize> },

    /// Bouton "back"
    Back,
}

/// Teste un événement, retourne la route s'il correspond
type Matcher = fn(&Router, &Event) -> Option<Route>;

/// Table des routes, par ordre de priorité
const ROUTES: &[(&str, Matcher)] = &[
    ("start", match_start),
    ("news", match_news),
    ("stocks", match_stocks),
    ("read_more", match_read_more),
    ("back", match_back),
];

/// Textes qui déclenchent l'affichage des news
const NEWS_TRIGGERS: [&str; 3] = ["/news", "News", "Refresh"];

/// Préfixes qui déclenchent l'affichage d'une cotation
const STOCKS_PREFIXES: [&str; 2] = ["/stocks", "Stocks"];

/// Routeur sans état : seul le ticker par défaut est configurable
#[derive(Debug, Clone, Default)]
pub struct Router {
    default_ticker: Ticker,
}

impl Router {
    pub fn new(default_ticker: Ticker) -> Self {
        Self { default_ticker }
    }

    /// Retourne le nom et la route du premier matcher qui accepte l'événement
    ///
    /// None : aucun handler, l'événement est ignoré.
    pub fn resolve(&self, event: &Event) -> Option<(&'static str, Route)> {
        ROUTES
            .iter()
            .find_map(|(name, matcher)| matcher(self, event).map(|route| (*name, route)))
    }
}

fn match_start(_: &Router, event: &Event) -> Option<Route> {
    let command = event.text()?.split_whitespace().next()?;
    // "/start" ou "/start@NomDuBot" dans les groupes
    if command == "/start" || command.starts_with("/start@") {
        Some(Route::Start)
    } else {
        None
    }
}

fn match_news(_: &Router, event: &Event) -> Option<Route> {
    let text = event.text()?;
    NEWS_TRIGGERS.contains(&text).then(|| Route::News {
        refresh: text == "Refresh",
    })
}

fn match_stocks(router: &Router, event: &Event) -> Option<Route> {
    let text = event.text()?;
    if STOCKS_PREFIXES.iter().any(|prefix| text.starts_with(*prefix)) {
        Some(Route::Stocks {
            ticker: Ticker::from_command(text, &router.default_ticker),
        })
    } else {
        None
    }
}

fn match_read_more(_: &Router, event: &Event) -> Option<Route> {
    let index = event.callback_data()?.strip_prefix(NEWS_PAYLOAD_PREFIX)?;
    Some(Route::ReadMore {
        index: index.parse().ok(),
    })
}

fn match_back(_: &Router, event: &Event) -> Option<Route> {
    (event.callback_data()? == BACK_PAYLOAD).then_some(Route::Back)
}

// ============================================================================
// Tests unitaires
// ============================================================================
