use concierge_ledger::{
    bot,
    config::{database, seed},
    core::{service_type, settings, wallet},
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also come from the environment
    dotenv().ok();

    // 3. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Seed wallets, service types and payout settings
    let seed_config = seed::load_default_config()?;
    wallet::ensure_wallets(&db).await?;
    let seeded = service_type::seed_service_types(&db, &seed_config.service_types).await?;
    if seeded > 0 {
        info!("Seeded {} service types from config.toml", seeded);
    }
    settings::ensure_payment_settings(&db, seed_config.payment_frequency_months).await?;

    // 5. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, db).await
}
