//! Shared test utilities for the concierge ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        apartment::{self, ApartmentDetails},
        charge::{self, ChargeDetails},
        partner::{PaidBy, Payer},
        payout,
        reservation::{self, ReservationDetails},
        service_type, wallet,
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables and both partner wallets.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = setup_test_db_without_seed().await?;
    wallet::ensure_wallets(&db).await?;
    Ok(db)
}

/// Creates an in-memory `SQLite` database with empty tables and no wallets.
pub async fn setup_test_db_without_seed() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test apartment with sensible defaults.
///
/// # Defaults
/// * `address`: `"1 Avenue Habib Bourguiba"`
/// * `owner_name`: `"Test Owner"`
/// * `commission_rate`: 25%
pub async fn create_test_apartment(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::apartment::Model> {
    create_custom_apartment(db, name, Some(25.0)).await
}

/// Creates a test apartment with a custom commission rate.
pub async fn create_custom_apartment(
    db: &DatabaseConnection,
    name: &str,
    commission_rate: Option<f64>,
) -> Result<entities::apartment::Model> {
    apartment::create_apartment(
        db,
        ApartmentDetails {
            name: name.to_string(),
            address: "1 Avenue Habib Bourguiba".to_string(),
            owner_name: "Test Owner".to_string(),
            owner_contact: None,
            commission_rate,
            notes: None,
        },
    )
    .await
}

/// Creates a service type with no description.
pub async fn create_test_service_type(
    db: &DatabaseConnection,
    name: &str,
    paid_by: PaidBy,
) -> Result<entities::service_type::Model> {
    service_type::create_service_type(db, name.to_string(), None, paid_by).await
}

/// Creates a reservation for `"Test Guest"`.
pub async fn create_test_reservation(
    db: &DatabaseConnection,
    apartment_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    total_amount: f64,
) -> Result<entities::reservation::Model> {
    reservation::create_reservation(
        db,
        ReservationDetails {
            apartment_id,
            client_name: "Test Guest".to_string(),
            check_in,
            check_out,
            total_amount,
            notes: None,
        },
    )
    .await
}

/// Creates a company-paid charge on the given date.
pub async fn create_test_charge(
    db: &DatabaseConnection,
    apartment_id: i64,
    service_type_id: i64,
    date: NaiveDate,
    amount: f64,
) -> Result<entities::charge::Model> {
    charge::create_charge(
        db,
        ChargeDetails {
            apartment_id,
            service_type_id,
            amount,
            date,
            description: None,
            paid_by: Payer::Company,
            notes: None,
        },
    )
    .await
}

/// Creates a charge paid by `payer` (`"imad"`, `"jassem"` or `"company"`).
///
/// # Defaults
/// * `date`: 2025-01-15
pub async fn create_paid_charge(
    db: &DatabaseConnection,
    apartment_id: i64,
    service_type_id: i64,
    amount: f64,
    payer: &str,
) -> Result<entities::charge::Model> {
    let paid_by: Payer = payer.parse()?;
    let date = NaiveDate::from_ymd_opt(2025, 1, 15).ok_or_else(|| {
        crate::errors::Error::Validation {
            message: "invalid test date".to_string(),
        }
    })?;
    charge::create_charge(
        db,
        ChargeDetails {
            apartment_id,
            service_type_id,
            amount,
            date,
            description: None,
            paid_by,
            notes: None,
        },
    )
    .await
}

/// Records a payout with a known total profit and no notes.
pub async fn create_test_payout(
    db: &DatabaseConnection,
    period_start: NaiveDate,
    period_end: NaiveDate,
    total_profit: f64,
) -> Result<entities::profit_payment::Model> {
    payout::create_payout(db, period_start, period_end, total_profit, None).await
}
