//! Wallet entity - Unreimbursed personal spending of one partner.
//!
//! There is exactly one row per partner. The balance only moves through the
//! atomic increment in `core::wallet`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wallet database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Partner owning the wallet: `"imad"` or `"jassem"`
    #[sea_orm(unique)]
    pub person_name: String,
    /// Amount the company owes the partner
    pub balance: f64,
    /// When the balance last changed
    pub updated_at: DateTimeUtc,
}

/// Wallets have no foreign keys; reimbursements reference them by `person_name`
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
