//! Reservation business logic.
//!
//! Reservations feed the commission side of profit. A stay must end after it
//! starts and cannot have a negative amount.

use crate::{
    core::apartment::require_apartment,
    entities::{Apartment, Reservation, apartment, reservation},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Fields of a reservation, used for both creation and full updates.
#[derive(Debug, Clone)]
pub struct ReservationDetails {
    /// Apartment being rented
    pub apartment_id: i64,
    /// Guest name
    pub client_name: String,
    /// Arrival date
    pub check_in: NaiveDate,
    /// Departure date
    pub check_out: NaiveDate,
    /// Amount paid by the guest
    pub total_amount: f64,
    /// Free-form notes
    pub notes: Option<String>,
}

impl ReservationDetails {
    fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Client name cannot be empty".to_string(),
            });
        }
        if self.check_out <= self.check_in {
            return Err(Error::InvalidStay {
                check_in: self.check_in,
                check_out: self.check_out,
            });
        }
        if !self.total_amount.is_finite() || self.total_amount < 0.0 {
            return Err(Error::InvalidAmount {
                amount: self.total_amount,
            });
        }
        Ok(())
    }
}

impl From<&reservation::Model> for ReservationDetails {
    fn from(model: &reservation::Model) -> Self {
        Self {
            apartment_id: model.apartment_id,
            client_name: model.client_name.clone(),
            check_in: model.check_in,
            check_out: model.check_out,
            total_amount: model.total_amount,
            notes: model.notes.clone(),
        }
    }
}

/// Retrieves all reservations, latest check-in first.
pub async fn get_all_reservations(db: &DatabaseConnection) -> Result<Vec<reservation::Model>> {
    Reservation::find()
        .order_by_desc(reservation::Column::CheckIn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all reservations with their apartment, latest check-in first.
pub async fn get_reservations_with_apartments(
    db: &DatabaseConnection,
) -> Result<Vec<(reservation::Model, Option<apartment::Model>)>> {
    Reservation::find()
        .find_also_related(Apartment)
        .order_by_desc(reservation::Column::CheckIn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the reservations of one apartment, latest check-in first.
pub async fn get_reservations_for_apartment(
    db: &DatabaseConnection,
    apartment_id: i64,
) -> Result<Vec<reservation::Model>> {
    Reservation::find()
        .filter(reservation::Column::ApartmentId.eq(apartment_id))
        .order_by_desc(reservation::Column::CheckIn)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a reservation by id.
pub async fn get_reservation_by_id(
    db: &DatabaseConnection,
    reservation_id: i64,
) -> Result<Option<reservation::Model>> {
    Reservation::find_by_id(reservation_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records a new reservation.
///
/// # Errors
/// Returns an error if the client name is empty, check-out is not after
/// check-in, the amount is negative, or the apartment does not exist.
pub async fn create_reservation(
    db: &DatabaseConnection,
    details: ReservationDetails,
) -> Result<reservation::Model> {
    details.validate()?;
    require_apartment(db, details.apartment_id).await?;

    let reservation = reservation::ActiveModel {
        apartment_id: Set(details.apartment_id),
        client_name: Set(details.client_name.trim().to_string()),
        check_in: Set(details.check_in),
        check_out: Set(details.check_out),
        total_amount: Set(details.total_amount),
        notes: Set(details.notes.filter(|n| !n.trim().is_empty())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Recorded reservation {} for apartment {} ({} to {})",
        reservation.id, reservation.apartment_id, reservation.check_in, reservation.check_out
    );
    Ok(reservation)
}

/// Replaces every editable field of a reservation.
pub async fn update_reservation(
    db: &DatabaseConnection,
    reservation_id: i64,
    details: ReservationDetails,
) -> Result<reservation::Model> {
    details.validate()?;

    let existing = get_reservation_by_id(db, reservation_id)
        .await?
        .ok_or(Error::ReservationNotFound { id: reservation_id })?;
    require_apartment(db, details.apartment_id).await?;

    let mut active_model: reservation::ActiveModel = existing.into();
    active_model.apartment_id = Set(details.apartment_id);
    active_model.client_name = Set(details.client_name.trim().to_string());
    active_model.check_in = Set(details.check_in);
    active_model.check_out = Set(details.check_out);
    active_model.total_amount = Set(details.total_amount);
    active_model.notes = Set(details.notes.filter(|n| !n.trim().is_empty()));

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a reservation.
pub async fn delete_reservation(db: &DatabaseConnection, reservation_id: i64) -> Result<()> {
    let existing = get_reservation_by_id(db, reservation_id)
        .await?
        .ok_or(Error::ReservationNotFound { id: reservation_id })?;
    existing.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn details(apartment_id: i64) -> ReservationDetails {
        ReservationDetails {
            apartment_id,
            client_name: "Sarah Trabelsi".to_string(),
            check_in: date(2025, 7, 1),
            check_out: date(2025, 7, 8),
            total_amount: 1400.0,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_reservation_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let same_day = ReservationDetails {
            check_out: date(2025, 7, 1),
            ..details(1)
        };
        assert!(matches!(
            create_reservation(&db, same_day).await,
            Err(Error::InvalidStay { .. })
        ));

        let negative = ReservationDetails {
            total_amount: -1.0,
            ..details(1)
        };
        assert!(matches!(
            create_reservation(&db, negative).await,
            Err(Error::InvalidAmount { amount: -1.0 })
        ));

        let nameless = ReservationDetails {
            client_name: " ".to_string(),
            ..details(1)
        };
        assert!(matches!(
            create_reservation(&db, nameless).await,
            Err(Error::Validation { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_reservation_requires_apartment() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_reservation(&db, details(77)).await;
        assert!(matches!(result, Err(Error::ApartmentNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_reservation_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;
        let apartment = create_test_apartment(&db, "Hammamet").await?;

        let created = create_reservation(&db, details(apartment.id)).await?;
        assert_eq!(created.client_name, "Sarah Trabelsi");
        assert_eq!(created.total_amount, 1400.0);

        let updated = update_reservation(
            &db,
            created.id,
            ReservationDetails {
                total_amount: 1500.0,
                check_out: date(2025, 7, 9),
                ..details(apartment.id)
            },
        )
        .await?;
        assert_eq!(updated.total_amount, 1500.0);
        assert_eq!(updated.check_out, date(2025, 7, 9));

        let listed = get_reservations_with_apartments(&db).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].1.as_ref().map(|a| a.id), Some(apartment.id));

        delete_reservation(&db, created.id).await?;
        assert!(get_reservation_by_id(&db, created.id).await?.is_none());
        assert!(matches!(
            delete_reservation(&db, created.id).await,
            Err(Error::ReservationNotFound { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_partial_edit_keeps_other_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let apartment = create_test_apartment(&db, "Hammamet").await?;
        let created = create_reservation(
            &db,
            ReservationDetails {
                notes: Some("Late arrival".to_string()),
                ..details(apartment.id)
            },
        )
        .await?;

        let edited = ReservationDetails {
            client_name: "Sarah B. Trabelsi".to_string(),
            ..ReservationDetails::from(&created)
        };
        let updated = update_reservation(&db, created.id, edited).await?;

        assert_eq!(updated.client_name, "Sarah B. Trabelsi");
        assert_eq!(updated.check_in, created.check_in);
        assert_eq!(updated.check_out, created.check_out);
        assert_eq!(updated.total_amount, 1400.0);
        assert_eq!(updated.notes.as_deref(), Some("Late arrival"));

        Ok(())
    }

    #[tokio::test]
    async fn test_reservations_ordered_by_check_in() -> Result<()> {
        let db = setup_test_db().await?;
        let apartment = create_test_apartment(&db, "Djerba").await?;
        let other = create_test_apartment(&db, "Tozeur").await?;

        create_test_reservation(&db, apartment.id, date(2025, 1, 1), date(2025, 1, 3), 100.0)
            .await?;
        create_test_reservation(&db, apartment.id, date(2025, 3, 1), date(2025, 3, 3), 100.0)
            .await?;
        create_test_reservation(&db, other.id, date(2025, 2, 1), date(2025, 2, 3), 100.0).await?;

        let all = get_all_reservations(&db).await?;
        let check_ins: Vec<NaiveDate> = all.iter().map(|r| r.check_in).collect();
        assert_eq!(
            check_ins,
            vec![date(2025, 3, 1), date(2025, 2, 1), date(2025, 1, 1)]
        );

        assert_eq!(get_reservations_for_apartment(&db, apartment.id).await?.len(), 2);

        Ok(())
    }
}
