//! `/license` slash command.
//!
//! Looks up a licence by key and identifier and replies with an ephemeral embed
//! describing it. Only server administrators see the command by default. The lookup is
//! read-only and never consumes a request.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage, Permissions,
    ResolvedValue,
};

use crate::server::{
    model::license::{License, LicenseStatus},
    service::license::LicenseService,
    util::validate::require_text,
};

pub const NAME: &str = "license";

const OPTION_KEY: &str = "key";
const OPTION_IDENTIFIER: &str = "identifier";

/// Builds the command registration sent to Discord.
pub fn register() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Show the state of a licence")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, OPTION_KEY, "Licence key")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                OPTION_IDENTIFIER,
                "Identifier the key belongs to",
            )
            .required(true),
        )
}

/// Runs the command and builds the ephemeral reply.
pub async fn run(
    db: &DatabaseConnection,
    interaction: &CommandInteraction,
) -> CreateInteractionResponse {
    let mut key = "";
    let mut identifier = "";
    for option in interaction.data.options() {
        if let ResolvedValue::String(value) = option.value {
            match option.name {
                OPTION_KEY => key = value,
                OPTION_IDENTIFIER => identifier = value,
                _ => {}
            }
        }
    }

    let embed = match lookup(db, key, identifier).await {
        Ok(Some(license)) => license_embed(&license, Utc::now()),
        Ok(None) => CreateEmbed::new()
            .title("Licence not found")
            .description(format!(
                "No licence `{}` exists for identifier `{}`.",
                key, identifier
            ))
            .colour(Colour::RED),
        Err(message) => CreateEmbed::new()
            .title("Lookup failed")
            .description(message)
            .colour(Colour::RED),
    };

    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(embed)
            .ephemeral(true),
    )
}

async fn lookup(
    db: &DatabaseConnection,
    key: &str,
    identifier: &str,
) -> Result<Option<License>, String> {
    let key = require_text(OPTION_KEY, key).map_err(|e| e.to_string())?;
    let identifier = require_text(OPTION_IDENTIFIER, identifier).map_err(|e| e.to_string())?;

    LicenseService::new(db)
        .find_by_key(&key, &identifier)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up licence for /{}: {}", NAME, e);
            "The licence could not be loaded, try again later.".to_string()
        })
}

fn license_embed(license: &License, now: DateTime<Utc>) -> CreateEmbed {
    let colour = match license.status(now) {
        LicenseStatus::Active => Colour::DARK_GREEN,
        LicenseStatus::Expired => Colour::RED,
        LicenseStatus::Exhausted => Colour::ORANGE,
    };

    license_fields(license, now).into_iter().fold(
        CreateEmbed::new()
            .title(format!("Licence {}", license.key))
            .colour(colour),
        |embed, (name, value, inline)| embed.field(name, value, inline),
    )
}

/// Embed fields as `(name, value, inline)`.
pub fn license_fields(license: &License, now: DateTime<Utc>) -> Vec<(&'static str, String, bool)> {
    let status = match license.status(now) {
        LicenseStatus::Active => "Active",
        LicenseStatus::Expired => "Expired",
        LicenseStatus::Exhausted => "Exhausted",
    };

    let ips = if license.ips.is_empty() {
        "None".to_string()
    } else {
        license.ips.join(", ")
    };

    vec![
        ("Identifier", license.identifier.clone(), true),
        ("Type", format!("{:?}", license.license_type), true),
        ("Status", status.to_string(), true),
        (
            "Valid until",
            format!("<t:{}:f>", license.valid_until.timestamp()),
            true,
        ),
        (
            "Requests",
            format!("{} / {}", license.request_count, license.request_limit),
            true,
        ),
        (
            "IPs",
            format!(
                "{} / {}: {}",
                license.ips.len(),
                license.effective_max_ips(),
                ips
            ),
            false,
        ),
    ]
}
