// ============================================================================
// LazyBot - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;      // Téléchargement et extraction (BBC, Yahoo)
pub mod app;      // Boucle de polling
pub mod bot;      // Routage et handlers
pub mod config;   // Configuration par variables d'environnement
pub mod error;    // Types d'erreurs
pub mod models;   // Structures de données
pub mod telegram; // Client API Telegram Bot
