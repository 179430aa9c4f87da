use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, error::AppError};

/// Builds the Discord bot client.
///
/// # Arguments
/// - `token` - Discord bot token
/// - `db` - Database connection used to look up licences
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::DiscordErr)` - Invalid token or client construction failure
pub async fn init_bot(token: &str, db: DatabaseConnection) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS;

    let client = Client::builder(token, intents)
        .event_handler(Handler::new(db))
        .await?;

    Ok(client)
}

/// Connects the bot to the gateway.
///
/// Runs until the connection is closed, so it should be called from within a
/// `tokio::spawn` task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot");

    client.start().await?;

    Ok(())
}
