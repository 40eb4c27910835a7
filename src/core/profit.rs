//! Period profit calculation.
//!
//! Profit for a payout period is the company commission on the period's unpaid
//! reservations minus the company-liable charges dated inside the period. The
//! result is split evenly between the two partners.
//!
//! The selection rules live in [`calculate_period_profit`], a pure function over
//! plain records, so they can be tested without a database.
//! [`preview_period_profit`] loads those records and runs it.

use crate::{
    core::{
        commission,
        partner::{PaidBy, Partner},
    },
    entities::{
        Apartment, Charge, ProfitPayment, Reservation, ServiceType, apartment, charge,
        profit_payment, reservation, service_type,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{Condition, prelude::*};
use tracing::{debug, instrument};

/// Inclusive date range of an existing payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaidPeriod {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
}

impl PaidPeriod {
    /// Whether `date` falls inside this period, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether this period is exactly `start..=end`.
    #[must_use]
    pub fn is_exactly(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start == start && self.end == end
    }

    /// Whether this period shares at least one day with `start..=end`.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start <= end && start <= self.end
    }
}

impl From<&profit_payment::Model> for PaidPeriod {
    fn from(payment: &profit_payment::Model) -> Self {
        Self {
            start: payment.period_start,
            end: payment.period_end,
        }
    }
}

/// A reservation together with its apartment's commission rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationLine {
    /// Reservation id
    pub id: i64,
    /// Arrival date
    pub check_in: NaiveDate,
    /// Departure date
    pub check_out: NaiveDate,
    /// Amount paid by the guest
    pub total_amount: f64,
    /// Apartment commission rate, `None` when unset or the apartment is gone
    pub commission_rate: Option<f64>,
}

impl ReservationLine {
    /// Joins a reservation with the apartment it belongs to.
    #[must_use]
    pub fn new(reservation: &reservation::Model, apartment: Option<&apartment::Model>) -> Self {
        Self {
            id: reservation.id,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            total_amount: reservation.total_amount,
            commission_rate: apartment.and_then(|a| a.commission_rate),
        }
    }
}

/// A charge together with its service type's liability.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeLine {
    /// Charge id
    pub id: i64,
    /// Date of the service
    pub date: NaiveDate,
    /// Charge amount
    pub amount: f64,
    /// Liability of the service type, `None` when unknown
    pub paid_by: Option<PaidBy>,
}

impl ChargeLine {
    /// Joins a charge with its service type. Unrecognised liabilities become `None`.
    #[must_use]
    pub fn new(charge: &charge::Model, service_type: Option<&service_type::Model>) -> Self {
        Self {
            id: charge.id,
            date: charge.date,
            amount: charge.amount,
            paid_by: service_type.and_then(|s| s.paid_by.parse().ok()),
        }
    }
}

/// Profit computed for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodProfit {
    /// First day of the period
    pub period_start: NaiveDate,
    /// Last day of the period
    pub period_end: NaiveDate,
    /// Sum of company commission over counted reservations
    pub total_commission: f64,
    /// Sum of company-liable charges in the period
    pub total_charges: f64,
    /// Commission minus charges, may be negative
    pub total_profit: f64,
    /// Imad's half
    pub imad_share: f64,
    /// Jassem's half
    pub jassem_share: f64,
    /// Reservations that contributed commission
    pub reservation_ids: Vec<i64>,
    /// Charges that were deducted
    pub charge_ids: Vec<i64>,
}

impl PeriodProfit {
    /// The share owed to one partner.
    #[must_use]
    pub const fn share_for(&self, partner: Partner) -> f64 {
        match partner {
            Partner::Imad => self.imad_share,
            Partner::Jassem => self.jassem_share,
        }
    }
}

/// Splits a profit evenly, returning `(imad_share, jassem_share)`.
#[must_use]
pub fn split_profit(total_profit: f64) -> (f64, f64) {
    let half = total_profit / 2.0;
    (half, half)
}

/// Rejects reversed periods.
pub fn validate_period(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(Error::InvalidPeriod { start, end });
    }
    Ok(())
}

/// Computes the profit for `period_start..=period_end`.
///
/// 1. An existing payout with exactly the same bounds fails with
///    [`Error::PeriodAlreadyPaid`].
/// 2. Reservations count when check-in or check-out falls inside the period,
///    unless their check-in falls inside any existing payout period.
/// 3. Charges count when dated inside the period and company-liable.
pub fn calculate_period_profit(
    period_start: NaiveDate,
    period_end: NaiveDate,
    existing_payments: &[PaidPeriod],
    reservations: &[ReservationLine],
    charges: &[ChargeLine],
) -> Result<PeriodProfit> {
    validate_period(period_start, period_end)?;

    if existing_payments
        .iter()
        .any(|paid| paid.is_exactly(period_start, period_end))
    {
        return Err(Error::PeriodAlreadyPaid {
            start: period_start,
            end: period_end,
        });
    }

    let period = PaidPeriod {
        start: period_start,
        end: period_end,
    };

    let mut total_commission = 0.0;
    let mut reservation_ids = Vec::new();
    for line in reservations {
        if !period.contains(line.check_in) && !period.contains(line.check_out) {
            continue;
        }
        if existing_payments
            .iter()
            .any(|paid| paid.contains(line.check_in))
        {
            continue;
        }
        total_commission += commission::commission(line.total_amount, line.commission_rate)
            .company_share;
        reservation_ids.push(line.id);
    }

    let mut total_charges = 0.0;
    let mut charge_ids = Vec::new();
    for line in charges {
        if period.contains(line.date) && line.paid_by == Some(PaidBy::Company) {
            total_charges += line.amount;
            charge_ids.push(line.id);
        }
    }

    let total_profit = total_commission - total_charges;
    let (imad_share, jassem_share) = split_profit(total_profit);

    Ok(PeriodProfit {
        period_start,
        period_end,
        total_commission,
        total_charges,
        total_profit,
        imad_share,
        jassem_share,
        reservation_ids,
        charge_ids,
    })
}

/// Loads every existing payout period.
pub async fn get_paid_periods<C>(db: &C) -> Result<Vec<PaidPeriod>>
where
    C: ConnectionTrait,
{
    let payments = ProfitPayment::find().all(db).await?;
    Ok(payments.iter().map(PaidPeriod::from).collect())
}

/// Computes the profit for a period from the database.
///
/// Reservations and charges are narrowed to the period in SQL, then the pure
/// calculation applies the exclusion rules. Generic over the connection so it
/// can run inside the transaction that creates the payout.
#[instrument(skip(db))]
pub async fn preview_period_profit<C>(
    db: &C,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<PeriodProfit>
where
    C: ConnectionTrait,
{
    validate_period(period_start, period_end)?;

    let paid_periods = get_paid_periods(db).await?;

    let reservations: Vec<ReservationLine> = Reservation::find()
        .filter(
            Condition::any()
                .add(reservation::Column::CheckIn.between(period_start, period_end))
                .add(reservation::Column::CheckOut.between(period_start, period_end)),
        )
        .find_also_related(Apartment)
        .all(db)
        .await?
        .iter()
        .map(|(res, apt)| ReservationLine::new(res, apt.as_ref()))
        .collect();

    let charges: Vec<ChargeLine> = Charge::find()
        .filter(charge::Column::Date.between(period_start, period_end))
        .find_also_related(ServiceType)
        .all(db)
        .await?
        .iter()
        .map(|(chg, svc)| ChargeLine::new(chg, svc.as_ref()))
        .collect();

    debug!(
        "Loaded {} reservations, {} charges and {} paid periods",
        reservations.len(),
        charges.len(),
        paid_periods.len()
    );

    calculate_period_profit(
        period_start,
        period_end,
        &paid_periods,
        &reservations,
        &charges,
    )
}
