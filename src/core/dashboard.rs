//! Dashboard business logic.
//!
//! All-time statistics, per-apartment performance and a recent activity feed.
//! Functions return structured data; the bot layer formats it.

use crate::{
    core::{
        commission,
        partner::PaidBy,
        wallet,
    },
    entities::{
        Apartment, Charge, Reservation, ServiceType, apartment, charge, reservation,
        service_type, wallet as wallet_entity,
    },
    errors::Result,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, prelude::*};
use std::collections::HashMap;

/// Totals over every reservation and charge ever recorded.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    /// Sum of reservation amounts
    pub total_revenue: f64,
    /// Company commission over all reservations
    pub total_commission: f64,
    /// Charges the company is liable for
    pub company_charges: f64,
    /// Charges the apartment owners are liable for
    pub owner_charges: f64,
    /// Commission minus company charges
    pub net_profit: f64,
    /// Number of registered apartments
    pub apartments_count: u64,
    /// Current partner wallets
    pub wallets: Vec<wallet_entity::Model>,
}

/// Revenue, commission and charges of one apartment.
#[derive(Debug, Clone)]
pub struct ApartmentPerformance {
    /// The apartment
    pub apartment: apartment::Model,
    /// Number of reservations
    pub reservations: usize,
    /// Sum of reservation amounts
    pub revenue: f64,
    /// Company commission on that revenue
    pub commission: f64,
    /// Sum of all charges on the apartment
    pub charges: f64,
}

/// One entry of the recent activity feed.
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    /// A reservation was recorded
    Reservation {
        /// Apartment name, if it still exists
        apartment: Option<String>,
        /// Guest name
        client_name: String,
        /// Arrival date
        check_in: NaiveDate,
        /// Amount paid by the guest
        amount: f64,
        /// When it was recorded
        created_at: DateTime<Utc>,
    },
    /// A charge was recorded
    Charge {
        /// Apartment name, if it still exists
        apartment: Option<String>,
        /// Service type name
        service: Option<String>,
        /// Charge amount
        amount: f64,
        /// Who paid
        paid_by: String,
        /// When it was recorded
        created_at: DateTime<Utc>,
    },
}

impl Activity {
    /// When the activity was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Reservation { created_at, .. } | Self::Charge { created_at, .. } => *created_at,
        }
    }
}

fn is_company_liable(service: Option<&service_type::Model>) -> bool {
    matches!(
        service.and_then(|s| s.paid_by.parse::<PaidBy>().ok()),
        Some(PaidBy::Company)
    )
}

/// Computes the all-time dashboard statistics.
pub async fn generate_dashboard_stats(db: &DatabaseConnection) -> Result<DashboardStats> {
    let reservations = Reservation::find()
        .find_also_related(Apartment)
        .all(db)
        .await?;

    let (total_revenue, total_commission) =
        reservations
            .iter()
            .fold((0.0, 0.0), |(revenue, commission_total), (res, apt)| {
                let rate = apt.as_ref().and_then(|a| a.commission_rate);
                (
                    revenue + res.total_amount,
                    commission_total + commission::commission(res.total_amount, rate).company_share,
                )
            });

    let charges = Charge::find().find_also_related(ServiceType).all(db).await?;
    let (company_charges, owner_charges) =
        charges
            .iter()
            .fold((0.0, 0.0), |(company, owner), (chg, service)| {
                if is_company_liable(service.as_ref()) {
                    (company + chg.amount, owner)
                } else {
                    (company, owner + chg.amount)
                }
            });

    let apartments_count = Apartment::find().count(db).await?;
    let wallets = wallet::get_all_wallets(db).await?;

    Ok(DashboardStats {
        total_revenue,
        total_commission,
        company_charges,
        owner_charges,
        net_profit: total_commission - company_charges,
        apartments_count,
        wallets,
    })
}

/// Computes revenue, commission and charges per apartment, best revenue first.
pub async fn apartment_performance(db: &DatabaseConnection) -> Result<Vec<ApartmentPerformance>> {
    let apartments = Apartment::find()
        .order_by_asc(apartment::Column::Name)
        .all(db)
        .await?;
    let reservations = Reservation::find().all(db).await?;
    let charges = Charge::find().all(db).await?;

    let mut by_apartment: HashMap<i64, ApartmentPerformance> = apartments
        .into_iter()
        .map(|apt| {
            (
                apt.id,
                ApartmentPerformance {
                    apartment: apt,
                    reservations: 0,
                    revenue: 0.0,
                    commission: 0.0,
                    charges: 0.0,
                },
            )
        })
        .collect();

    for res in &reservations {
        if let Some(perf) = by_apartment.get_mut(&res.apartment_id) {
            perf.reservations += 1;
            perf.revenue += res.total_amount;
            perf.commission +=
                commission::commission(res.total_amount, perf.apartment.commission_rate)
                    .company_share;
        }
    }
    for chg in &charges {
        if let Some(perf) = by_apartment.get_mut(&chg.apartment_id) {
            perf.charges += chg.amount;
        }
    }

    let mut performance: Vec<ApartmentPerformance> = by_apartment.into_values().collect();
    performance.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.apartment.name.cmp(&b.apartment.name))
    });
    Ok(performance)
}

/// Latest reservations and charges merged into one feed, newest first.
///
/// Up to `limit` of each kind are loaded and the merged feed is cut to `limit`.
pub async fn recent_activity(db: &DatabaseConnection, limit: u64) -> Result<Vec<Activity>> {
    let reservations: Vec<(reservation::Model, Option<apartment::Model>)> = Reservation::find()
        .find_also_related(Apartment)
        .order_by_desc(reservation::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?;

    let charges: Vec<(charge::Model, Option<service_type::Model>)> = Charge::find()
        .find_also_related(ServiceType)
        .order_by_desc(charge::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?;

    let apartment_names: HashMap<i64, String> = Apartment::find()
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();

    let mut feed: Vec<Activity> = reservations
        .into_iter()
        .map(|(res, apt)| Activity::Reservation {
            apartment: apt.map(|a| a.name),
            client_name: res.client_name,
            check_in: res.check_in,
            amount: res.total_amount,
            created_at: res.created_at,
        })
        .chain(charges.into_iter().map(|(chg, service)| Activity::Charge {
            apartment: apartment_names.get(&chg.apartment_id).cloned(),
            service: service.map(|s| s.name),
            amount: chg.amount,
            paid_by: chg.paid_by_person,
            created_at: chg.created_at,
        }))
        .collect();

    feed.sort_by_key(|activity| std::cmp::Reverse(activity.created_at()));
    feed.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    Ok(feed)
}

/// Formats an amount in Tunisian dinars, e.g. `"1234.50 TND"`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2} TND")
}
