//! Service type business logic.
//!
//! Service types classify charges and decide who is liable for them. Only
//! company-liable charges reduce partner profit.

use crate::{
    core::partner::PaidBy,
    entities::{Charge, ServiceType, charge, service_type},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all service types ordered by name.
pub async fn get_all_service_types(db: &DatabaseConnection) -> Result<Vec<service_type::Model>> {
    ServiceType::find()
        .order_by_asc(service_type::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a service type by id.
pub async fn get_service_type_by_id<C>(
    db: &C,
    service_type_id: i64,
) -> Result<Option<service_type::Model>>
where
    C: ConnectionTrait,
{
    ServiceType::find_by_id(service_type_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a service type by its exact name.
pub async fn get_service_type_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<service_type::Model>> {
    ServiceType::find()
        .filter(service_type::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a service type.
pub async fn create_service_type(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
    paid_by: PaidBy,
) -> Result<service_type::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Service type name cannot be empty".to_string(),
        });
    }

    let service = service_type::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description.filter(|d| !d.trim().is_empty())),
        paid_by: Set(paid_by.as_str().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created service type {} paid by {}", service.name, paid_by);
    Ok(service)
}

/// Updates the name, description or liability of a service type.
///
/// Changing `paid_by` changes how past charges of this type count in future
/// profit previews; payouts already recorded are unaffected.
pub async fn update_service_type(
    db: &DatabaseConnection,
    service_type_id: i64,
    name: Option<String>,
    description: Option<String>,
    paid_by: Option<PaidBy>,
) -> Result<service_type::Model> {
    let existing = get_service_type_by_id(db, service_type_id)
        .await?
        .ok_or_else(|| Error::ServiceTypeNotFound {
            id: service_type_id.to_string(),
        })?;

    let mut active_model: service_type::ActiveModel = existing.into();
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Service type name cannot be empty".to_string(),
            });
        }
        active_model.name = Set(name.trim().to_string());
    }
    if let Some(description) = description {
        active_model.description = Set(Some(description).filter(|d| !d.trim().is_empty()));
    }
    if let Some(paid_by) = paid_by {
        active_model.paid_by = Set(paid_by.as_str().to_string());
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a service type that no charge references.
///
/// # Errors
/// Returns [`Error::ServiceTypeInUse`] while charges still use it.
pub async fn delete_service_type(db: &DatabaseConnection, service_type_id: i64) -> Result<()> {
    let existing = get_service_type_by_id(db, service_type_id)
        .await?
        .ok_or_else(|| Error::ServiceTypeNotFound {
            id: service_type_id.to_string(),
        })?;

    let charges = Charge::find()
        .filter(charge::Column::ServiceTypeId.eq(service_type_id))
        .count(db)
        .await?;
    if charges > 0 {
        return Err(Error::ServiceTypeInUse {
            id: service_type_id,
            charges,
        });
    }

    existing.delete(db).await?;
    Ok(())
}

/// Creates the given service types unless one with the same name exists.
///
/// Returns how many were inserted.
pub async fn seed_service_types(
    db: &DatabaseConnection,
    seeds: &[crate::config::seed::ServiceTypeConfig],
) -> Result<usize> {
    let mut inserted = 0;
    for seed in seeds {
        if get_service_type_by_name(db, &seed.name).await?.is_some() {
            continue;
        }
        let paid_by: PaidBy = seed.paid_by.parse()?;
        create_service_type(db, seed.name.clone(), seed.description.clone(), paid_by).await?;
        inserted += 1;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::seed::ServiceTypeConfig, test_utils::*};

    #[tokio::test]
    async fn test_create_service_type() -> Result<()> {
        let db = setup_test_db().await?;

        let service = create_service_type(
            &db,
            " Cleaning ".to_string(),
            Some(String::new()),
            PaidBy::Company,
        )
        .await?;
        assert_eq!(service.name, "Cleaning");
        assert_eq!(service.description, None);
        assert_eq!(service.paid_by, "company");

        let empty = create_service_type(&db, String::new(), None, PaidBy::Owner).await;
        assert!(matches!(empty, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_service_type_liability() -> Result<()> {
        let db = setup_test_db().await?;
        let service = create_test_service_type(&db, "Plumbing", PaidBy::Company).await?;

        let updated =
            update_service_type(&db, service.id, None, None, Some(PaidBy::Owner)).await?;
        assert_eq!(updated.paid_by, "owner");
        assert_eq!(updated.name, "Plumbing");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_service_type_in_use_is_refused() -> Result<()> {
        let db = setup_test_db().await?;
        let apartment = create_test_apartment(&db, "Sousse").await?;
        let used = create_test_service_type(&db, "Laundry", PaidBy::Company).await?;
        let unused = create_test_service_type(&db, "Painting", PaidBy::Owner).await?;
        create_paid_charge(&db, apartment.id, used.id, 15.0, "company").await?;

        let refused = delete_service_type(&db, used.id).await;
        assert!(matches!(
            refused,
            Err(Error::ServiceTypeInUse { charges: 1, .. })
        ));

        delete_service_type(&db, unused.id).await?;
        assert!(get_service_type_by_id(&db, unused.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_service_types_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_service_type(&db, "Cleaning", PaidBy::Company).await?;

        let seeds = vec![
            ServiceTypeConfig {
                name: "Cleaning".to_string(),
                description: None,
                paid_by: "company".to_string(),
            },
            ServiceTypeConfig {
                name: "Electricity".to_string(),
                description: Some("STEG bills".to_string()),
                paid_by: "owner".to_string(),
            },
        ];

        assert_eq!(seed_service_types(&db, &seeds).await?, 1);
        assert_eq!(get_all_service_types(&db).await?.len(), 2);

        Ok(())
    }
}
