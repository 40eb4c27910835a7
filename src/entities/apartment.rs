//! Apartment entity - A rental property managed on behalf of an owner.
//!
//! Each apartment carries the commission rate the company retains on its
//! reservations. A missing rate means the default 25% applies.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Apartment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "apartments")]
pub struct Model {
    /// Unique identifier for the apartment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Sidi Bou Said S+2")
    pub name: String,
    /// Street address
    pub address: String,
    /// Name of the property owner
    pub owner_name: String,
    /// Optional phone or email of the owner
    pub owner_contact: Option<String>,
    /// Percentage of each reservation retained by the company (0-100)
    pub commission_rate: Option<f64>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the apartment was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Apartment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One apartment has many reservations
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
    /// One apartment has many charges
    #[sea_orm(has_many = "super::charge::Entity")]
    Charges,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::charge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Charges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
