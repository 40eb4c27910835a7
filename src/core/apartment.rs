//! Apartment business logic - Registration, lookup, update and removal of apartments.
//!
//! Deleting an apartment removes its reservations and charges too. Charges a
//! partner paid personally are taken back out of that partner's wallet first, so
//! wallet balances keep matching the remaining charge history.

use crate::{
    core::{commission, partner::Payer, wallet},
    entities::{Apartment, Charge, Reservation, apartment, charge, reservation},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Fields needed to register an apartment.
#[derive(Debug, Clone, Default)]
pub struct ApartmentDetails {
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Owner name
    pub owner_name: String,
    /// Owner phone or email
    pub owner_contact: Option<String>,
    /// Commission percentage, `None` for the default
    pub commission_rate: Option<f64>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Partial update of an apartment; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ApartmentUpdate {
    /// New display name
    pub name: Option<String>,
    /// New address
    pub address: Option<String>,
    /// New owner name
    pub owner_name: Option<String>,
    /// New owner contact
    pub owner_contact: Option<String>,
    /// New commission percentage
    pub commission_rate: Option<f64>,
    /// New notes
    pub notes: Option<String>,
}

/// What a cascading apartment deletion removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApartmentDeletion {
    /// Number of reservations deleted
    pub reservations_removed: u64,
    /// Number of charges deleted
    pub charges_removed: u64,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Apartment name cannot be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_rate(rate: Option<f64>) -> Result<()> {
    match rate {
        Some(rate) if !commission::is_valid_rate(rate) => {
            Err(Error::InvalidCommissionRate { rate })
        }
        _ => Ok(()),
    }
}

/// Retrieves all apartments ordered alphabetically by name.
pub async fn get_all_apartments(db: &DatabaseConnection) -> Result<Vec<apartment::Model>> {
    Apartment::find()
        .order_by_asc(apartment::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an apartment by id.
pub async fn get_apartment_by_id<C>(db: &C, apartment_id: i64) -> Result<Option<apartment::Model>>
where
    C: ConnectionTrait,
{
    Apartment::find_by_id(apartment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an apartment by its exact name.
pub async fn get_apartment_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<apartment::Model>> {
    Apartment::find()
        .filter(apartment::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads an apartment or fails with [`Error::ApartmentNotFound`].
pub async fn require_apartment<C>(db: &C, apartment_id: i64) -> Result<apartment::Model>
where
    C: ConnectionTrait,
{
    get_apartment_by_id(db, apartment_id)
        .await?
        .ok_or_else(|| Error::ApartmentNotFound {
            id: apartment_id.to_string(),
        })
}

/// Registers a new apartment.
///
/// # Errors
/// Returns an error if the name is empty, the commission rate is outside 0-100,
/// or the insert fails.
pub async fn create_apartment(
    db: &DatabaseConnection,
    details: ApartmentDetails,
) -> Result<apartment::Model> {
    validate_name(&details.name)?;
    validate_rate(details.commission_rate)?;

    let apartment = apartment::ActiveModel {
        name: Set(details.name.trim().to_string()),
        address: Set(details.address.trim().to_string()),
        owner_name: Set(details.owner_name.trim().to_string()),
        owner_contact: Set(non_empty(details.owner_contact)),
        commission_rate: Set(details.commission_rate),
        notes: Set(non_empty(details.notes)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Registered apartment {} ({})", apartment.name, apartment.id);
    Ok(apartment)
}

/// Applies a partial update to an apartment.
pub async fn update_apartment(
    db: &DatabaseConnection,
    apartment_id: i64,
    update: ApartmentUpdate,
) -> Result<apartment::Model> {
    validate_rate(update.commission_rate)?;
    if let Some(name) = &update.name {
        validate_name(name)?;
    }

    let existing = require_apartment(db, apartment_id).await?;
    let mut active_model: apartment::ActiveModel = existing.into();

    if let Some(name) = update.name {
        active_model.name = Set(name.trim().to_string());
    }
    if let Some(address) = update.address {
        active_model.address = Set(address.trim().to_string());
    }
    if let Some(owner_name) = update.owner_name {
        active_model.owner_name = Set(owner_name.trim().to_string());
    }
    if update.owner_contact.is_some() {
        active_model.owner_contact = Set(non_empty(update.owner_contact));
    }
    if let Some(rate) = update.commission_rate {
        active_model.commission_rate = Set(Some(rate));
    }
    if update.notes.is_some() {
        active_model.notes = Set(non_empty(update.notes));
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes an apartment together with its reservations and charges.
///
/// Partner-paid charges are reversed out of the wallets in the same transaction.
#[instrument(skip(db))]
pub async fn delete_apartment(
    db: &DatabaseConnection,
    apartment_id: i64,
) -> Result<ApartmentDeletion> {
    let txn = db.begin().await?;

    let apartment = require_apartment(&txn, apartment_id).await?;

    let charges = Charge::find()
        .filter(charge::Column::ApartmentId.eq(apartment_id))
        .all(&txn)
        .await?;
    for chg in &charges {
        let payer: Payer = chg.paid_by_person.parse()?;
        wallet::record_charge(&txn, payer, -chg.amount).await?;
    }

    let charges_removed = Charge::delete_many()
        .filter(charge::Column::ApartmentId.eq(apartment_id))
        .exec(&txn)
        .await?
        .rows_affected;
    let reservations_removed = Reservation::delete_many()
        .filter(reservation::Column::ApartmentId.eq(apartment_id))
        .exec(&txn)
        .await?
        .rows_affected;

    apartment.delete(&txn).await?;
    txn.commit().await?;

    info!(
        "Deleted apartment {} with {} reservations and {} charges",
        apartment_id, reservations_removed, charges_removed
    );
    Ok(ApartmentDeletion {
        reservations_removed,
        charges_removed,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::partner::{PaidBy, Partner},
        test_utils::*,
    };
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_apartment_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_apartment(
            &db,
            ApartmentDetails {
                name: "   ".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_apartment(
            &db,
            ApartmentDetails {
                name: "Lac 2".to_string(),
                commission_rate: Some(120.0),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::InvalidCommissionRate { rate: 120.0 })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_find_apartment() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_apartment(
            &db,
            ApartmentDetails {
                name: "  La Marsa Duplex ".to_string(),
                address: "12 Rue de Carthage".to_string(),
                owner_name: "Mme Ben Salah".to_string(),
                owner_contact: Some(String::new()),
                commission_rate: None,
                notes: None,
            },
        )
        .await?;

        assert_eq!(created.name, "La Marsa Duplex");
        assert_eq!(created.owner_contact, None);
        assert_eq!(created.commission_rate, None);

        let by_name = get_apartment_by_name(&db, "La Marsa Duplex").await?;
        assert_eq!(by_name, Some(created.clone()));
        let by_id = get_apartment_by_id(&db, created.id).await?;
        assert_eq!(by_id, Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_apartment_partial() -> Result<()> {
        let db = setup_test_db().await?;
        let apartment = create_test_apartment(&db, "Menzah").await?;

        let updated = update_apartment(
            &db,
            apartment.id,
            ApartmentUpdate {
                commission_rate: Some(30.0),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.commission_rate, Some(30.0));
        assert_eq!(updated.name, "Menzah");

        let missing = update_apartment(&db, 999, ApartmentUpdate::default()).await;
        assert!(matches!(missing, Err(Error::ApartmentNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_apartment_cascades_and_keeps_wallets_consistent() -> Result<()> {
        let db = setup_test_db().await?;
        let doomed = create_test_apartment(&db, "Doomed").await?;
        let kept = create_test_apartment(&db, "Kept").await?;
        let service = create_test_service_type(&db, "Cleaning", PaidBy::Company).await?;

        let day = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        create_test_reservation(&db, doomed.id, day, day.succ_opt().unwrap(), 300.0).await?;
        create_paid_charge(&db, doomed.id, service.id, 40.0, "imad").await?;
        create_paid_charge(&db, doomed.id, service.id, 60.0, "company").await?;
        create_paid_charge(&db, kept.id, service.id, 25.0, "imad").await?;

        let deletion = delete_apartment(&db, doomed.id).await?;
        assert_eq!(deletion.charges_removed, 2);
        assert_eq!(deletion.reservations_removed, 1);

        assert!(get_apartment_by_id(&db, doomed.id).await?.is_none());
        assert_eq!(get_all_apartments(&db).await?.len(), 1);

        let imad = wallet::reconcile_wallet(&db, Partner::Imad).await?;
        assert!(imad.is_consistent());
        assert_eq!(imad.recorded_balance, 25.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_apartment() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_apartment(&db, 42).await;
        assert!(matches!(result, Err(Error::ApartmentNotFound { .. })));
        Ok(())
    }
}
