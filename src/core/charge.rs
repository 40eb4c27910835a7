//! Charge business logic - Recording service expenses and their wallet effects.
//!
//! A charge paid personally by a partner is money the company owes that partner.
//! Creating, editing and deleting a charge therefore always touches the payer's
//! wallet, and both writes happen in one database transaction: either the charge
//! and the wallet change are both stored, or neither is.

use crate::{
    core::{apartment::require_apartment, partner::Payer, service_type, wallet},
    entities::{Charge, ServiceType, charge},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Fields of a charge, used for both creation and full updates.
#[derive(Debug, Clone)]
pub struct ChargeDetails {
    /// Apartment the charge is for
    pub apartment_id: i64,
    /// Service type classifying the charge
    pub service_type_id: i64,
    /// Amount in TND
    pub amount: f64,
    /// Date of the service
    pub date: NaiveDate,
    /// Optional description
    pub description: Option<String>,
    /// Who paid
    pub paid_by: Payer,
    /// Free-form notes
    pub notes: Option<String>,
}

impl ChargeDetails {
    fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount {
                amount: self.amount,
            });
        }
        Ok(())
    }
}

impl TryFrom<&charge::Model> for ChargeDetails {
    type Error = Error;

    /// Current values of a stored charge, as a base for partial edits.
    fn try_from(model: &charge::Model) -> Result<Self> {
        Ok(Self {
            apartment_id: model.apartment_id,
            service_type_id: model.service_type_id,
            amount: model.amount,
            date: model.date,
            description: model.description.clone(),
            paid_by: model.paid_by_person.parse()?,
            notes: model.notes.clone(),
        })
    }
}

async fn require_references<C>(db: &C, details: &ChargeDetails) -> Result<()>
where
    C: ConnectionTrait,
{
    require_apartment(db, details.apartment_id).await?;
    service_type::get_service_type_by_id(db, details.service_type_id)
        .await?
        .ok_or_else(|| Error::ServiceTypeNotFound {
            id: details.service_type_id.to_string(),
        })?;
    Ok(())
}

/// Records a charge and credits the payer's wallet in a single transaction.
///
/// # Errors
/// Returns an error if the amount is negative or not finite, the apartment or
/// service type does not exist, or any write fails. On error nothing is stored.
#[instrument(skip(db, details), fields(amount = details.amount, payer = %details.paid_by))]
pub async fn create_charge(db: &DatabaseConnection, details: ChargeDetails) -> Result<charge::Model> {
    details.validate()?;

    let txn = db.begin().await?;
    require_references(&txn, &details).await?;

    let charge = charge::ActiveModel {
        apartment_id: Set(details.apartment_id),
        service_type_id: Set(details.service_type_id),
        amount: Set(details.amount),
        date: Set(details.date),
        description: Set(details.description.filter(|d| !d.trim().is_empty())),
        paid_by_person: Set(details.paid_by.as_str().to_string()),
        notes: Set(details.notes.filter(|n| !n.trim().is_empty())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    wallet::record_charge(&txn, details.paid_by, details.amount).await?;

    txn.commit().await?;

    info!("Recorded charge {} of {:.2}", charge.id, charge.amount);
    Ok(charge)
}

/// Replaces every editable field of a charge, moving wallet credit as needed.
///
/// The old amount is taken back from the old payer and the new amount credited
/// to the new payer, so changing either the amount or the payer keeps wallets
/// consistent.
#[instrument(skip(db, details))]
pub async fn update_charge(
    db: &DatabaseConnection,
    charge_id: i64,
    details: ChargeDetails,
) -> Result<charge::Model> {
    details.validate()?;

    let txn = db.begin().await?;

    let existing = Charge::find_by_id(charge_id)
        .one(&txn)
        .await?
        .ok_or(Error::ChargeNotFound { id: charge_id })?;
    require_references(&txn, &details).await?;

    let old_payer: Payer = existing.paid_by_person.parse()?;
    wallet::record_charge(&txn, old_payer, -existing.amount).await?;
    wallet::record_charge(&txn, details.paid_by, details.amount).await?;

    let mut active_model: charge::ActiveModel = existing.into();
    active_model.apartment_id = Set(details.apartment_id);
    active_model.service_type_id = Set(details.service_type_id);
    active_model.amount = Set(details.amount);
    active_model.date = Set(details.date);
    active_model.description = Set(details.description.filter(|d| !d.trim().is_empty()));
    active_model.paid_by_person = Set(details.paid_by.as_str().to_string());
    active_model.notes = Set(details.notes.filter(|n| !n.trim().is_empty()));
    let updated = active_model.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Deletes a charge and reverses its wallet credit.
pub async fn delete_charge(db: &DatabaseConnection, charge_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Charge::find_by_id(charge_id)
        .one(&txn)
        .await?
        .ok_or(Error::ChargeNotFound { id: charge_id })?;

    let payer: Payer = existing.paid_by_person.parse()?;
    let amount = existing.amount;
    existing.delete(&txn).await?;
    wallet::record_charge(&txn, payer, -amount).await?;

    txn.commit().await?;
    Ok(())
}

/// Finds a charge by id.
pub async fn get_charge_by_id(
    db: &DatabaseConnection,
    charge_id: i64,
) -> Result<Option<charge::Model>> {
    Charge::find_by_id(charge_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all charges, newest date first.
pub async fn get_all_charges(db: &DatabaseConnection) -> Result<Vec<charge::Model>> {
    Charge::find()
        .order_by_desc(charge::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all charges with their service type, newest date first.
pub async fn get_charges_with_service_types(
    db: &DatabaseConnection,
) -> Result<Vec<(charge::Model, Option<crate::entities::service_type::Model>)>> {
    Charge::find()
        .find_also_related(ServiceType)
        .order_by_desc(charge::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the charges of one apartment, newest date first.
pub async fn get_charges_for_apartment(
    db: &DatabaseConnection,
    apartment_id: i64,
) -> Result<Vec<charge::Model>> {
    Charge::find()
        .filter(charge::Column::ApartmentId.eq(apartment_id))
        .order_by_desc(charge::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}
