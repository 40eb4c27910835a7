//! Charge entity - A service expense incurred for an apartment.
//!
//! `paid_by_person` records who actually paid: `"company"`, or one of the
//! partners (`"imad"`, `"jassem"`) in which case the amount sits in that
//! partner's wallet until reimbursed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Charge database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "charges")]
pub struct Model {
    /// Unique identifier for the charge
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Apartment the charge was incurred for
    pub apartment_id: i64,
    /// Service type classifying the charge
    pub service_type_id: i64,
    /// Amount in TND (non-negative)
    pub amount: f64,
    /// Date the service took place
    pub date: Date,
    /// Optional description
    pub description: Option<String>,
    /// Who paid: `"company"`, `"imad"` or `"jassem"`
    pub paid_by_person: String,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the charge was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Charge and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each charge belongs to one apartment
    #[sea_orm(
        belongs_to = "super::apartment::Entity",
        from = "Column::ApartmentId",
        to = "super::apartment::Column::Id",
        on_delete = "Cascade"
    )]
    Apartment,
    /// Each charge is classified by one service type
    #[sea_orm(
        belongs_to = "super::service_type::Entity",
        from = "Column::ServiceTypeId",
        to = "super::service_type::Column::Id"
    )]
    ServiceType,
}

impl Related<super::apartment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Apartment.def()
    }
}

impl Related<super::service_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
