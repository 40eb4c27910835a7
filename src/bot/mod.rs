//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the concierge ledger,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (apartments, charges, wallets, payouts, ...)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Every slash command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::dashboard(),
        commands::add_apartment(),
        commands::apartments(),
        commands::update_apartment(),
        commands::delete_apartment(),
        commands::add_service(),
        commands::services(),
        commands::update_service(),
        commands::delete_service(),
        commands::add_reservation(),
        commands::reservations(),
        commands::update_reservation(),
        commands::delete_reservation(),
        commands::add_charge(),
        commands::charges(),
        commands::update_charge(),
        commands::delete_charge(),
        commands::wallets(),
        commands::reimburse(),
        commands::wallet_history(),
        commands::payout_preview(),
        commands::generate_payout(),
        commands::add_payout(),
        commands::payouts(),
        commands::mark_paid(),
        commands::payout_settings(),
    ]
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip(token, database))]
pub async fn run_bot(token: String, database: DatabaseConnection) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(
                    "Registered {} commands globally",
                    framework.options().commands.len()
                );
                Ok(BotData::new(database))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_edit_command_is_registered() {
        let names: Vec<String> = all_commands().into_iter().map(|c| c.name).collect();
        for expected in [
            "update_apartment",
            "update_service",
            "update_reservation",
            "update_charge",
            "add_payout",
            "generate_payout",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing /{expected}");
        }

        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names.len(), 28);
    }
}
