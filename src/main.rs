mod model;
mod server;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::server::{bot, config::Config, error::AppError, router, startup, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;

    tracing::info!("Starting server");

    // Discord bot is optional; without a token only the HTTP API runs
    match config.discord_bot_token.as_deref() {
        Some(token) => {
            let bot_client = bot::start::init_bot(token, db.clone()).await?;

            tokio::spawn(async move {
                if let Err(e) = bot::start::start_bot(bot_client).await {
                    tracing::error!("Discord bot error: {}", e);
                }
            });
        }
        None => tracing::info!("DISCORD_BOT_TOKEN not set, Discord bot disabled"),
    }

    let app = router::router(config.rate_limit_validate_rpm, config.trust_proxy)?
        .with_state(AppState::new(db, &config.admin_api_key, config.trust_proxy))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    startup::serve(app, config.bind_addr).await
}
