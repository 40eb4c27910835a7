//! Payment settings entity - Singleton row holding the payout frequency.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment settings database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_settings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// How many months a payout period usually spans (advisory)
    pub payment_frequency_months: i32,
    /// When the setting was last modified
    pub updated_at: DateTimeUtc,
}

/// `PaymentSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
