//! Wallet reimbursement entity - A repayment from the company to a partner.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wallet reimbursement database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_reimbursements")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Partner reimbursed: `"imad"` or `"jassem"`
    pub person_name: String,
    /// Amount repaid in TND
    pub amount: f64,
    /// When the repayment was made
    pub payment_date: DateTimeUtc,
    /// Free-form notes
    pub notes: Option<String>,
}

/// `WalletReimbursement` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
