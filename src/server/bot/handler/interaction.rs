use sea_orm::DatabaseConnection;
use serenity::all::{Context, Interaction};

use crate::server::bot::command;

/// Dispatches slash command interactions to their command implementation.
pub async fn handle_interaction_create(
    db: &DatabaseConnection,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Command(interaction) = interaction else {
        return;
    };

    let response = match interaction.data.name.as_str() {
        command::license::NAME => command::license::run(db, &interaction).await,
        name => {
            tracing::warn!("Received unknown command /{}", name);
            return;
        }
    };

    if let Err(e) = interaction.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to /{}: {}", interaction.data.name, e);
    }
}
