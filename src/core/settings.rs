//! Payment settings - How often profit payouts are made.
//!
//! The frequency is advisory. It drives [`suggest_next_period`] but never
//! restricts which periods can be paid.

use crate::{
    entities::{PaymentSettings, ProfitPayment, Reservation, payment_settings, profit_payment, reservation},
    errors::{Error, Result},
};
use chrono::{Datelike, Months, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Payout frequency used until one is configured.
pub const DEFAULT_PAYMENT_FREQUENCY_MONTHS: i32 = 3;

/// Reads the payout frequency, falling back to the default when unset.
pub async fn get_payment_frequency<C>(db: &C) -> Result<i32>
where
    C: ConnectionTrait,
{
    let settings = PaymentSettings::find()
        .order_by_asc(payment_settings::Column::Id)
        .one(db)
        .await?;
    Ok(settings.map_or(DEFAULT_PAYMENT_FREQUENCY_MONTHS, |s| {
        s.payment_frequency_months
    }))
}

/// Returns the stored settings row, if any.
pub async fn get_payment_settings(
    db: &DatabaseConnection,
) -> Result<Option<payment_settings::Model>> {
    PaymentSettings::find()
        .order_by_asc(payment_settings::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Stores the payout frequency, updating the single settings row or creating it.
///
/// # Errors
/// Returns [`Error::InvalidFrequency`] unless `months` is at least 1.
pub async fn set_payment_frequency(
    db: &DatabaseConnection,
    months: i32,
) -> Result<payment_settings::Model> {
    if months < 1 {
        return Err(Error::InvalidFrequency { months });
    }

    let now = Utc::now();
    let settings = if let Some(existing) = get_payment_settings(db).await? {
        let mut active_model: payment_settings::ActiveModel = existing.into();
        active_model.payment_frequency_months = Set(months);
        active_model.updated_at = Set(now);
        active_model.update(db).await?
    } else {
        payment_settings::ActiveModel {
            payment_frequency_months: Set(months),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?
    };

    info!("Payout frequency set to {} months", months);
    Ok(settings)
}

/// Creates the settings row with `months` unless one already exists.
pub async fn ensure_payment_settings(
    db: &DatabaseConnection,
    months: Option<i32>,
) -> Result<payment_settings::Model> {
    if let Some(existing) = get_payment_settings(db).await? {
        return Ok(existing);
    }
    set_payment_frequency(db, months.unwrap_or(DEFAULT_PAYMENT_FREQUENCY_MONTHS)).await
}

/// Period spanning `months` whole months from `start`, end inclusive.
///
/// # Errors
/// Returns [`Error::InvalidFrequency`] for a non-positive month count.
pub fn period_from(start: NaiveDate, months: i32) -> Result<(NaiveDate, NaiveDate)> {
    let span = u32::try_from(months)
        .ok()
        .filter(|m| *m > 0)
        .ok_or(Error::InvalidFrequency { months })?;
    let end = start
        .checked_add_months(Months::new(span))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| Error::Validation {
            message: format!("Period starting {start} is out of range"),
        })?;
    Ok((start, end))
}

/// Suggests the next period to pay out.
///
/// The period starts the day after the latest paid period ends. Without any
/// payout it starts on the first day of the month of the earliest check-in,
/// or of the current month when there are no reservations either.
pub async fn suggest_next_period(db: &DatabaseConnection) -> Result<(NaiveDate, NaiveDate)> {
    let months = get_payment_frequency(db).await?;

    let latest = ProfitPayment::find()
        .order_by_desc(profit_payment::Column::PeriodEnd)
        .one(db)
        .await?;

    let start = if let Some(payout) = latest {
        payout
            .period_end
            .succ_opt()
            .ok_or_else(|| Error::Validation {
                message: format!("No day follows {}", payout.period_end),
            })?
    } else {
        let earliest = Reservation::find()
            .order_by_asc(reservation::Column::CheckIn)
            .one(db)
            .await?
            .map_or_else(|| Utc::now().date_naive(), |r| r.check_in);
        earliest.with_day(1).unwrap_or(earliest)
    };

    period_from(start, months)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_frequency_defaults_to_three_months() -> Result<()> {
        let db = setup_test_db_without_seed().await?;
        assert_eq!(get_payment_frequency(&db).await?, 3);
        assert!(get_payment_settings(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_payment_frequency_upserts() -> Result<()> {
        let db = setup_test_db_without_seed().await?;

        let first = set_payment_frequency(&db, 6).await?;
        let second = set_payment_frequency(&db, 1).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(get_payment_frequency(&db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_payment_frequency_rejects_non_positive() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        for months in [0, -3] {
            let result = set_payment_frequency(&db, months).await;
            assert!(matches!(result, Err(Error::InvalidFrequency { .. })));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_payment_settings_keeps_existing() -> Result<()> {
        let db = setup_test_db_without_seed().await?;
        set_payment_frequency(&db, 2).await?;

        let settings = ensure_payment_settings(&db, Some(12)).await?;
        assert_eq!(settings.payment_frequency_months, 2);

        Ok(())
    }

    #[test]
    fn test_period_from_spans_whole_months() {
        assert_eq!(
            period_from(date(2025, 1, 1), 3).unwrap(),
            (date(2025, 1, 1), date(2025, 3, 31))
        );
        assert_eq!(
            period_from(date(2024, 2, 1), 1).unwrap(),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert!(period_from(date(2025, 1, 1), 0).is_err());
    }

    #[tokio::test]
    async fn test_suggest_next_period_follows_latest_payout() -> Result<()> {
        let db = setup_test_db().await?;
        set_payment_frequency(&db, 3).await?;
        create_test_payout(&db, date(2025, 1, 1), date(2025, 3, 31), 100.0).await?;

        assert_eq!(
            suggest_next_period(&db).await?,
            (date(2025, 4, 1), date(2025, 6, 30))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_suggest_first_period_from_earliest_reservation() -> Result<()> {
        let db = setup_test_db().await?;
        set_payment_frequency(&db, 1).await?;
        let apartment = create_test_apartment(&db, "Gammarth").await?;
        create_test_reservation(&db, apartment.id, date(2025, 5, 17), date(2025, 5, 20), 400.0)
            .await?;

        assert_eq!(
            suggest_next_period(&db).await?,
            (date(2025, 5, 1), date(2025, 5, 31))
        );

        Ok(())
    }
}
