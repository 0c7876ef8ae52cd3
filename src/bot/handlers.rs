// ============================================================================
// Handlers
// ============================================================================
// Exécute une route : télécharge, extrait, formate, répond
//
// CONCEPTS RUST :
// 1. Trait objects : &dyn ReplySink, le handler ne connaît pas Telegram
// 2. Conversion explicite des erreurs : FetchError -> texte d'affichage
// 3. let-else : sortie anticipée quand il n'y a nulle part où répondre
// ============================================================================

use tracing::{debug, error, info, warn};

use crate::api::{fetch_headlines, fetch_quote};
use crate::error::TelegramError;
use crate::models::{link_at, Headline, Quote, Ticker};
use crate::telegram::keyboards::{back_keyboard, main_menu, news_keyboard};
use crate::telegram::{ReplyMarkup, ReplySink};

use super::context::BotContext;
use super::events::Event;
use super::render::{
    fetching_text, link_text, news_text, quote_text, BACK_TO_MENU, GREETING, NEWS_NOT_FOUND,
    REFRESHING,
};
use super::router::Route;

/// Point d'entrée : route l'événement puis exécute le handler
///
/// Ne retourne jamais d'erreur : un échec d'envoi est loggé et la tâche se
/// termine normalement.
pub async fn dispatch(ctx: &BotContext, sink: &dyn ReplySink, event: Event) {
    let user_id = event.user_id();

    let Some((name, route)) = ctx.router.resolve(&event) else {
        debug!(user_id, ?event, "Unhandled event");
        return;
    };
    debug!(user_id, route = name, "Dispatching event");

    if let Err(e) = handle(ctx, sink, &event, route).await {
        error!(user_id, route = name, error = %e, "Failed to send reply");
    }
}

async fn handle(
    ctx: &BotContext,
    sink: &dyn ReplySink,
    event: &Event,
    route: Route,
) -> Result<(), TelegramError> {
    let user_id = event.user_id();

    match route {
        Route::Start => {
            info!(user_id, "User started the bot");
            reply(sink, event, GREETING, Some(main_menu())).await
        }

        Route::News { refresh } => {
            info!(user_id, text = event.text().unwrap_or_default(), "User requested news");
            if refresh {
                reply(sink, event, REFRESHING, None).await?;
            }
            let headlines = load_headlines(ctx).await;
            reply(sink, event, &news_text(&headlines), Some(news_keyboard(headlines.len()))).await
        }

        Route::Stocks { ticker } => {
            info!(user_id, text = event.text().unwrap_or_default(), "User requested stocks");
            reply(sink, event, &fetching_text(&ticker), None).await?;
            let quote = load_quote(ctx, &ticker).await;
            reply(sink, event, &quote_text(&ticker, &quote), Some(back_keyboard())).await
        }

        Route::ReadMore { index } => {
            info!(user_id, data = event.callback_data().unwrap_or_default(), "User clicked 'Read more'");
            // Re-télécharge la page : l'index peut désigner un autre titre
            // si le site a changé depuis l'affichage de la liste
            let headlines = load_headlines(ctx).await;
            let text = match index.and_then(|i| link_at(&headlines, i)) {
                Some(link) => link_text(link),
                None => {
                    warn!(user_id, ?index, available = headlines.len(), "News index out of range");
                    NEWS_NOT_FOUND.to_string()
                }
            };
            let sent = reply(sink, event, &text, None).await;
            acknowledge(sink, event).await;
            sent
        }

        Route::Back => {
            info!(user_id, "User clicked 'Back'");
            let sent = reply(sink, event, BACK_TO_MENU, Some(main_menu())).await;
            acknowledge(sink, event).await;
            sent
        }
    }
}

/// Télécharge les titres, ou un titre d'erreur si le site est injoignable
pub async fn load_headlines(ctx: &BotContext) -> Vec<Headline> {
    match fetch_headlines(&ctx.fetcher, &ctx.config.news_url).await {
        Ok(headlines) => headlines,
        Err(e) => {
            error!(error = %e, "Failed to load news");
            vec![Headline::load_error(&e)]
        }
    }
}

/// Télécharge la cotation, ou une cotation d'erreur si le site est injoignable
pub async fn load_quote(ctx: &BotContext, ticker: &Ticker) -> Quote {
    match fetch_quote(
        &ctx.fetcher,
        &ctx.config.quote_base_url,
        ticker,
        ctx.config.quote_delay,
    )
    .await
    {
        Ok(quote) => quote,
        Err(e) => {
            error!(ticker = %ticker, error = %e, "Failed to load stock data");
            Quote::from_error(&e)
        }
    }
}

/// Répond dans le chat d'origine de l'événement
async fn reply(
    sink: &dyn ReplySink,
    event: &Event,
    text: &str,
    markup: Option<ReplyMarkup>,
) -> Result<(), TelegramError> {
    let Some(target) = event.reply_target() else {
        warn!(user_id = event.user_id(), "No chat to reply to, dropping reply");
        return Ok(());
    };
    sink.send(target, text, markup.as_ref()).await
}

/// Acquitte le clic (fait disparaître le sablier côté client)
async fn acknowledge(sink: &dyn ReplySink, event: &Event) {
    if let Event::Callback { callback_id, .. } = event {
        if let Err(e) = sink.answer_callback(callback_id).await {
            warn!(callback_id = %callback_id, error = %e, "Failed to answer callback query");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
