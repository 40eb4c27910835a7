//! Argument parsing shared by commands.
//!
//! Discord passes dates and names as plain strings; these helpers turn them into
//! domain values or a user-facing [`Error`].

use crate::{
    config::partners,
    core::{apartment, partner::Partner, service_type},
    entities::{apartment as apartment_entity, service_type as service_type_entity},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Date format accepted by every command, e.g. `2025-03-31`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| Error::Validation {
        message: format!("Invalid date '{input}', expected YYYY-MM-DD"),
    })
}

/// Resolves the partner a command acts for.
///
/// An explicit name wins; otherwise the invoking Discord user must be
/// configured as one of the partners.
pub fn resolve_partner(author_id: &str, given: Option<&str>) -> Result<Partner> {
    match given {
        Some(name) => name.parse(),
        None => partners::partner_for_discord_user(author_id).ok_or_else(|| Error::Validation {
            message: "You are not configured as a partner; pass the partner explicitly"
                .to_string(),
        }),
    }
}

/// Looks up an apartment by exact name.
pub async fn find_apartment(
    db: &DatabaseConnection,
    name: &str,
) -> Result<apartment_entity::Model> {
    apartment::get_apartment_by_name(db, name)
        .await?
        .ok_or_else(|| Error::ApartmentNotFound {
            id: name.to_string(),
        })
}

/// Looks up a service type by exact name.
pub async fn find_service_type(
    db: &DatabaseConnection,
    name: &str,
) -> Result<service_type_entity::Model> {
    service_type::get_service_type_by_name(db, name)
        .await?
        .ok_or_else(|| Error::ServiceTypeNotFound {
            id: name.to_string(),
        })
}
