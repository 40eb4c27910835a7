//! Reservation entity - A guest stay in one apartment.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reservation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    /// Unique identifier for the reservation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Apartment being rented
    pub apartment_id: i64,
    /// Guest name
    pub client_name: String,
    /// Arrival date
    pub check_in: Date,
    /// Departure date (strictly after `check_in`)
    pub check_out: Date,
    /// Total amount paid by the guest in TND
    pub total_amount: f64,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the reservation was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Reservation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reservation belongs to one apartment
    #[sea_orm(
        belongs_to = "super::apartment::Entity",
        from = "Column::ApartmentId",
        to = "super::apartment::Column::Id",
        on_delete = "Cascade"
    )]
    Apartment,
}

impl Related<super::apartment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Apartment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
