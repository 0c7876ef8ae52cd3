// ============================================================================
// LazyBot - Bot Telegram d'actualités et de cotations
// ============================================================================
// Interroge Telegram en long polling, répond aux commandes avec les titres
// BBC News et les cotations Yahoo Finance
//
// CONCEPTS RUST CLÉS :
// 1. Async dans sync : tokio::runtime::Runtime + block_on
// 2. Arc : client Telegram et contexte partagés entre tâches
// 3. Cleanup garanti : la session est fermée même si la boucle échoue
// ============================================================================

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use lazybot::app::App;
use lazybot::bot::BotContext;
use lazybot::config::{default_log_dir, Config};
use lazybot::telegram::TelegramClient;

// ============================================================================
// Initialisation du logging
// ============================================================================

/// Initialise le logging vers la console et un fichier quotidien
///
/// CONCEPT RUST : Tracing subscriber
/// - Registry : point central des logs
/// - Deux layers fmt : stdout + RollingFileAppender
/// - EnvFilter : filtre par niveau (RUST_LOG env var)
///
/// # Utilisation
/// ```bash
/// RUST_LOG=lazybot=trace cargo run
/// LAZYBOT_LOG_DIR=/tmp/lazybot cargo run
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    // Nouveau fichier chaque jour : lazybot.log.2024-01-15
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "lazybot.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Utile avec plusieurs handlers en parallèle
                .with_line_number(true),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazybot=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'installation du subscriber")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // La config est lue avant le logging : elle fournit le répertoire des logs
    let config = Config::from_env();
    let log_dir = match &config {
        Ok(config) => config.log_dir.clone(),
        Err(_) => default_log_dir(),
    };

    init_logging(&log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    let config = config.context("Configuration invalide")?;
    info!("LazyBot starting up");

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run_bot(config));

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Connecte le bot, lance la boucle de polling, puis ferme tout
///
/// CONCEPT : Cleanup et RAII
/// - app.shutdown() est appelé quel que soit le résultat de run()
/// - Ctrl-C termine la boucle proprement
async fn run_bot(config: Config) -> Result<()> {
    let client = TelegramClient::new(&config.telegram).context("Échec de la création du client HTTP")?;

    match client.get_me().await {
        Ok(me) => info!(
            id = me.id,
            username = me.username.as_deref().unwrap_or("?"),
            "Connected to Telegram"
        ),
        Err(e) if e.is_fatal() => {
            client.close();
            return Err(anyhow::Error::new(e).context("Token Telegram refusé"));
        }
        // Réseau indisponible au démarrage : la boucle réessaiera
        Err(e) => warn!(error = %e, "Could not identify bot, starting anyway"),
    }

    let context = Arc::new(BotContext::new(config));
    let mut app = App::new(Arc::new(client), context);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    let result = app.run(shutdown).await;

    app.shutdown().await;
    result
}
