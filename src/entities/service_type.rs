//! Service type entity - Classifies charges (cleaning, laundry, plumbing, ...).
//!
//! `paid_by` decides who is liable for charges of this type: `"company"` charges
//! are deducted from partner profit, `"owner"` charges are not.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service type database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_types")]
pub struct Model {
    /// Unique identifier for the service type
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the service (unique)
    #[sea_orm(unique)]
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Liability: `"company"` or `"owner"`
    pub paid_by: String,
}

/// Defines relationships between `ServiceType` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One service type classifies many charges
    #[sea_orm(has_many = "super::charge::Entity")]
    Charges,
}

impl Related<super::charge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Charges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
