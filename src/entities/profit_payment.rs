//! Profit payment entity - A finalized 50/50 profit payout for one period.
//!
//! `(period_start, period_end)` is unique: a period is never paid twice. The
//! unique index is created alongside the table in `config::database`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profit payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profit_payments")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// First day of the period (inclusive)
    pub period_start: Date,
    /// Last day of the period (inclusive)
    pub period_end: Date,
    /// Commission minus company charges for the period
    pub total_profit: f64,
    /// Imad's half of the profit
    pub imad_share: f64,
    /// Jassem's half of the profit
    pub jassem_share: f64,
    /// Whether Imad's share has been paid
    pub imad_paid: bool,
    /// Whether Jassem's share has been paid
    pub jassem_paid: bool,
    /// When Imad's share was paid
    pub imad_payment_date: Option<DateTimeUtc>,
    /// When Jassem's share was paid
    pub jassem_payment_date: Option<DateTimeUtc>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the payout was created
    pub created_at: DateTimeUtc,
}

/// `ProfitPayment` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
