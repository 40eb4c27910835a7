//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.
//! Creation is idempotent (`IF NOT EXISTS`) and safe to run on every startup.

use crate::entities::{
    Apartment, Charge, PaymentSettings, ProfitPayment, Reservation, ServiceType, Wallet,
    WalletReimbursement, profit_payment,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/concierge_ledger.sqlite?mode=rwc";
const UNIQUE_PERIOD_INDEX: &str = "idx_profit_payments_unique_period";

/// Gets the database URL from the `DATABASE_URL` environment variable, or the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Directory holding the database file of a `sqlite://` URL, if it has one.
fn sqlite_parent_dir(database_url: &str) -> Option<PathBuf> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Establishes a connection to the database named by [`get_database_url`].
///
/// The directory of a file-backed `SQLite` database is created if missing.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if let Some(dir) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(&dir)?;
    }
    debug!("Connecting to database at {}", database_url);

    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table_for<C, E>(db: &C, schema: &Schema, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates every ledger table plus the unique payout period index.
///
/// Parents are created before children so the foreign keys generated from the
/// entity relations resolve.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table_for(db, &schema, Apartment).await?;
    create_table_for(db, &schema, ServiceType).await?;
    create_table_for(db, &schema, Reservation).await?;
    create_table_for(db, &schema, Charge).await?;
    create_table_for(db, &schema, Wallet).await?;
    create_table_for(db, &schema, WalletReimbursement).await?;
    create_table_for(db, &schema, ProfitPayment).await?;
    create_table_for(db, &schema, PaymentSettings).await?;

    let period_index = Index::create()
        .name(UNIQUE_PERIOD_INDEX)
        .table(ProfitPayment)
        .col(profit_payment::Column::PeriodStart)
        .col(profit_payment::Column::PeriodEnd)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&period_index)).await?;

    info!("Database tables ensured.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        apartment::Model as ApartmentModel, charge::Model as ChargeModel,
        profit_payment::Model as ProfitPaymentModel, wallet::Model as WalletModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<ApartmentModel> = Apartment::find().limit(1).all(&db).await?;
        let _: Vec<ChargeModel> = Charge::find().limit(1).all(&db).await?;
        let _: Vec<WalletModel> = Wallet::find().limit(1).all(&db).await?;
        let _: Vec<ProfitPaymentModel> = ProfitPayment::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_singleton_tables_accept_wide_ids() -> Result<()> {
        use crate::entities::{payment_settings, wallet};
        use sea_orm::{ActiveModelTrait, Set};

        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        let wide_id = i64::from(i32::MAX) + 1;

        wallet::ActiveModel {
            id: Set(wide_id),
            person_name: Set("imad".to_string()),
            balance: Set(0.0),
            updated_at: Set(chrono::Utc::now()),
        }
        .insert(&db)
        .await?;
        payment_settings::ActiveModel {
            id: Set(wide_id),
            payment_frequency_months: Set(3),
            updated_at: Set(chrono::Utc::now()),
        }
        .insert(&db)
        .await?;

        let stored_wallet = Wallet::find_by_id(wide_id).one(&db).await?;
        assert_eq!(stored_wallet.map(|w| w.id), Some(wide_id));
        let stored_settings = PaymentSettings::find_by_id(wide_id).one(&db).await?;
        assert_eq!(stored_settings.map(|s| s.id), Some(wide_id));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/ledger.sqlite?mode=rwc"),
            Some(PathBuf::from("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite://ledger.sqlite"), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
    }

    #[test]
    fn test_get_database_url_has_fallback() {
        assert!(get_database_url().starts_with("sqlite:") || std::env::var("DATABASE_URL").is_ok());
    }
}
