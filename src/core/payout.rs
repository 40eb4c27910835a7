//! Payout records - Finalized profit payments per period.
//!
//! A payout freezes the profit of one period and splits it 50/50. Each partner
//! is then marked paid independently. Payouts are append-only: there is no
//! amendment or deletion, and a period can only be paid once.

use crate::{
    core::{
        partner::Partner,
        profit::{self, PeriodProfit},
    },
    entities::{ProfitPayment, profit_payment},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};

/// Whether a partner has received their share of a payout, and when.
#[must_use]
pub const fn partner_status(
    payout: &profit_payment::Model,
    partner: Partner,
) -> (bool, Option<DateTime<Utc>>) {
    match partner {
        Partner::Imad => (payout.imad_paid, payout.imad_payment_date),
        Partner::Jassem => (payout.jassem_paid, payout.jassem_payment_date),
    }
}

/// Whether both partners have received their share.
#[must_use]
pub const fn is_fully_paid(payout: &profit_payment::Model) -> bool {
    payout.imad_paid && payout.jassem_paid
}

/// Existing payouts sharing at least one day with `start..=end`.
pub async fn find_overlapping_payouts<C>(
    db: &C,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<profit_payment::Model>>
where
    C: ConnectionTrait,
{
    ProfitPayment::find()
        .filter(profit_payment::Column::PeriodStart.lte(end))
        .filter(profit_payment::Column::PeriodEnd.gte(start))
        .order_by_asc(profit_payment::Column::PeriodStart)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn insert_payout<C>(
    db: &C,
    period_start: NaiveDate,
    period_end: NaiveDate,
    total_profit: f64,
    notes: Option<String>,
) -> Result<profit_payment::Model>
where
    C: ConnectionTrait,
{
    profit::validate_period(period_start, period_end)?;
    if !total_profit.is_finite() {
        return Err(Error::InvalidAmount {
            amount: total_profit,
        });
    }

    let overlapping = find_overlapping_payouts(db, period_start, period_end).await?;
    if overlapping
        .iter()
        .any(|p| p.period_start == period_start && p.period_end == period_end)
    {
        return Err(Error::PeriodAlreadyPaid {
            start: period_start,
            end: period_end,
        });
    }
    // Only identical periods are refused; partial overlaps are let through.
    for other in &overlapping {
        warn!(
            "Payout period {} to {} overlaps existing payout {} ({} to {})",
            period_start, period_end, other.id, other.period_start, other.period_end
        );
    }

    let (imad_share, jassem_share) = profit::split_profit(total_profit);

    profit_payment::ActiveModel {
        period_start: Set(period_start),
        period_end: Set(period_end),
        total_profit: Set(total_profit),
        imad_share: Set(imad_share),
        jassem_share: Set(jassem_share),
        imad_paid: Set(false),
        jassem_paid: Set(false),
        imad_payment_date: Set(None),
        jassem_payment_date: Set(None),
        notes: Set(notes.filter(|n| !n.trim().is_empty())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Records a payout for a period with an already known total profit.
///
/// # Errors
/// Returns [`Error::PeriodAlreadyPaid`] if a payout exists for exactly this
/// period, [`Error::InvalidPeriod`] if start is after end.
#[instrument(skip(db, notes))]
pub async fn create_payout(
    db: &DatabaseConnection,
    period_start: NaiveDate,
    period_end: NaiveDate,
    total_profit: f64,
    notes: Option<String>,
) -> Result<profit_payment::Model> {
    let txn = db.begin().await?;
    let payout = insert_payout(&txn, period_start, period_end, total_profit, notes).await?;
    txn.commit().await?;

    info!(
        "Created payout {} for {} to {}: {:.2}",
        payout.id, payout.period_start, payout.period_end, payout.total_profit
    );
    Ok(payout)
}

/// Computes the period's profit and records it as a payout in one transaction.
#[instrument(skip(db, notes))]
pub async fn generate_payout(
    db: &DatabaseConnection,
    period_start: NaiveDate,
    period_end: NaiveDate,
    notes: Option<String>,
) -> Result<(profit_payment::Model, PeriodProfit)> {
    let txn = db.begin().await?;

    let computed = profit::preview_period_profit(&txn, period_start, period_end).await?;
    let payout = insert_payout(
        &txn,
        period_start,
        period_end,
        computed.total_profit,
        notes,
    )
    .await?;

    txn.commit().await?;

    info!(
        "Generated payout {} from {} reservations and {} charges",
        payout.id,
        computed.reservation_ids.len(),
        computed.charge_ids.len()
    );
    Ok((payout, computed))
}

/// Marks one partner's share of a payout as paid now.
///
/// Marking an already-paid partner again changes nothing and keeps the original
/// payment date.
#[instrument(skip(db))]
pub async fn mark_paid(
    db: &DatabaseConnection,
    payout_id: i64,
    partner: Partner,
) -> Result<profit_payment::Model> {
    let payout = get_payout_by_id(db, payout_id)
        .await?
        .ok_or(Error::PayoutNotFound { id: payout_id })?;

    if partner_status(&payout, partner).0 {
        info!("{} already marked paid on payout {}", partner, payout_id);
        return Ok(payout);
    }

    let now = Utc::now();
    let mut active_model: profit_payment::ActiveModel = payout.into();
    match partner {
        Partner::Imad => {
            active_model.imad_paid = Set(true);
            active_model.imad_payment_date = Set(Some(now));
        }
        Partner::Jassem => {
            active_model.jassem_paid = Set(true);
            active_model.jassem_payment_date = Set(Some(now));
        }
    }

    let updated = active_model.update(db).await?;
    info!("Marked {} paid on payout {}", partner, payout_id);
    Ok(updated)
}

/// Finds a payout by id.
pub async fn get_payout_by_id(
    db: &DatabaseConnection,
    payout_id: i64,
) -> Result<Option<profit_payment::Model>> {
    ProfitPayment::find_by_id(payout_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all payouts, most recent period first.
pub async fn get_all_payouts(db: &DatabaseConnection) -> Result<Vec<profit_payment::Model>> {
    ProfitPayment::find()
        .order_by_desc(profit_payment::Column::PeriodStart)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{core::partner::PaidBy, test_utils::*};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_payout_splits_evenly() -> Result<()> {
        let db = setup_test_db().await?;

        let payout = create_payout(
            &db,
            date(2025, 1, 1),
            date(2025, 3, 31),
            380.0,
            Some("Q1".to_string()),
        )
        .await?;

        assert_eq!(payout.total_profit, 380.0);
        assert_eq!(payout.imad_share, 190.0);
        assert_eq!(payout.jassem_share, 190.0);
        assert!(!payout.imad_paid);
        assert!(!payout.jassem_paid);
        assert!(payout.imad_payment_date.is_none());
        assert_eq!(payout.notes.as_deref(), Some("Q1"));

        Ok(())
    }

    #[tokio::test]
    async fn test_same_period_cannot_be_paid_twice() -> Result<()> {
        let db = setup_test_db().await?;

        create_payout(&db, date(2025, 1, 1), date(2025, 1, 31), 100.0, None).await?;
        let second = create_payout(&db, date(2025, 1, 1), date(2025, 1, 31), 100.0, None).await;

        assert!(matches!(second, Err(Error::PeriodAlreadyPaid { .. })));
        assert_eq!(get_all_payouts(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_overlapping_period_is_allowed() -> Result<()> {
        let db = setup_test_db().await?;

        create_payout(&db, date(2025, 1, 1), date(2025, 1, 31), 100.0, None).await?;
        create_payout(&db, date(2025, 1, 15), date(2025, 2, 15), 50.0, None).await?;

        let overlapping = find_overlapping_payouts(&db, date(2025, 1, 31), date(2025, 1, 31)).await?;
        assert_eq!(overlapping.len(), 2);

        let none = find_overlapping_payouts(&db, date(2025, 3, 1), date(2025, 3, 31)).await?;
        assert!(none.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_reversed_period_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_payout(&db, date(2025, 2, 1), date(2025, 1, 1), 10.0, None).await;
        assert!(matches!(result, Err(Error::InvalidPeriod { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_paid_one_partner() -> Result<()> {
        let db = setup_test_db().await?;
        let payout = create_payout(&db, date(2025, 1, 1), date(2025, 1, 31), 200.0, None).await?;

        let before = Utc::now();
        let updated = mark_paid(&db, payout.id, Partner::Imad).await?;

        assert!(updated.imad_paid);
        assert!(updated.imad_payment_date.unwrap() >= before);
        assert!(!updated.jassem_paid);
        assert!(updated.jassem_payment_date.is_none());
        assert!(!is_fully_paid(&updated));

        let both = mark_paid(&db, payout.id, Partner::Jassem).await?;
        assert!(is_fully_paid(&both));

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_paid_twice_keeps_first_date() -> Result<()> {
        let db = setup_test_db().await?;
        let payout = create_payout(&db, date(2025, 1, 1), date(2025, 1, 31), 200.0, None).await?;

        let first = mark_paid(&db, payout.id, Partner::Jassem).await?;
        let second = mark_paid(&db, payout.id, Partner::Jassem).await?;

        assert_eq!(first.jassem_payment_date, second.jassem_payment_date);
        assert_eq!(
            partner_status(&second, Partner::Jassem),
            (true, first.jassem_payment_date)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_paid_missing_payout() -> Result<()> {
        let db = setup_test_db().await?;
        let result = mark_paid(&db, 12, Partner::Imad).await;
        assert!(matches!(result, Err(Error::PayoutNotFound { id: 12 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_payout_excludes_previously_paid_reservations() -> Result<()> {
        let db = setup_test_db().await?;
        let apartment = create_test_apartment(&db, "Mutuelleville").await?;
        let cleaning = create_test_service_type(&db, "Cleaning", PaidBy::Company).await?;

        // Paid in the January payout.
        create_test_reservation(&db, apartment.id, date(2025, 1, 29), date(2025, 2, 2), 2000.0)
            .await?;
        // Belongs to February.
        create_test_reservation(&db, apartment.id, date(2025, 2, 10), date(2025, 2, 14), 2000.0)
            .await?;
        create_test_charge(&db, apartment.id, cleaning.id, date(2025, 2, 15), 120.0).await?;

        let (january, _) =
            generate_payout(&db, date(2025, 1, 1), date(2025, 1, 31), None).await?;
        assert_eq!(january.total_profit, 500.0);

        let (february, computed) =
            generate_payout(&db, date(2025, 2, 1), date(2025, 2, 28), None).await?;
        assert_eq!(computed.reservation_ids.len(), 1);
        assert_eq!(february.total_profit, 380.0);
        assert_eq!(february.imad_share, 190.0);
        assert_eq!(february.jassem_share, 190.0);

        let again = generate_payout(&db, date(2025, 2, 1), date(2025, 2, 28), None).await;
        assert!(matches!(again, Err(Error::PeriodAlreadyPaid { .. })));

        Ok(())
    }
}
