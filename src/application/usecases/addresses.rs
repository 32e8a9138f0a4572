use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{error, info};

use crate::domain::entities::addresses::{AddressEntity, InsertAddressEntity};
use crate::domain::repositories::addresses::AddressRepository;
use crate::domain::value_objects::addresses::{CreateAddressModel, UpdateAddressModel};

#[derive(Debug, Error)]
pub enum AddressBookError {
    #[error("{0}")]
    Validation(String),
    #[error("address not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AddressBookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AddressBookError::Validation(_) => StatusCode::BAD_REQUEST,
            AddressBookError::NotFound => StatusCode::NOT_FOUND,
            AddressBookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct AddressBookUseCase<T>
where
    T: AddressRepository + Send + Sync,
{
    address_repository: Arc<T>,
}

impl<T> AddressBookUseCase<T>
where
    T: AddressRepository + Send + Sync,
{
    pub fn new(address_repository: Arc<T>) -> Self {
        Self { address_repository }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<AddressEntity>, AddressBookError> {
        let addresses = self
            .address_repository
            .list_by_user(user_id)
            .await
            .map_err(|err| {
                error!(user_id, db_error = ?err, "addresses: failed to list");
                AddressBookError::Internal(err)
            })?;
        Ok(addresses)
    }

    pub async fn create(&self, model: CreateAddressModel) -> Result<i64, AddressBookError> {
        validate_contact(&model.full_name, &model.phone, &model.address)?;

        let address_id = self
            .address_repository
            .insert(InsertAddressEntity {
                user_id: model.user_id,
                full_name: model.full_name,
                phone: model.phone,
                address: model.address,
                city: model.city,
                is_default: model.is_default,
            })
            .await
            .map_err(|err| {
                error!(user_id = model.user_id, db_error = ?err, "addresses: insert failed");
                AddressBookError::Internal(err)
            })?;

        info!(address_id, "addresses: created");
        Ok(address_id)
    }

    pub async fn update(
        &self,
        address_id: i64,
        model: UpdateAddressModel,
    ) -> Result<(), AddressBookError> {
        validate_contact(&model.full_name, &model.phone, &model.address)?;

        let updated = self
            .address_repository
            .update(
                address_id,
                InsertAddressEntity {
                    user_id: model.user_id,
                    full_name: model.full_name,
                    phone: model.phone,
                    address: model.address,
                    city: model.city,
                    is_default: model.is_default,
                },
            )
            .await
            .map_err(|err| {
                error!(address_id, db_error = ?err, "addresses: update failed");
                AddressBookError::Internal(err)
            })?;

        if !updated {
            return Err(AddressBookError::NotFound);
        }
        Ok(())
    }

    pub async fn remove(&self, address_id: i64, user_id: i64) -> Result<(), AddressBookError> {
        let deleted = self
            .address_repository
            .delete(address_id, user_id)
            .await
            .map_err(|err| {
                error!(address_id, db_error = ?err, "addresses: delete failed");
                AddressBookError::Internal(err)
            })?;

        if !deleted {
            return Err(AddressBookError::NotFound);
        }
        Ok(())
    }
}

fn validate_contact(full_name: &str, phone: &str, address: &str) -> Result<(), AddressBookError> {
    if full_name.trim().is_empty() {
        return Err(AddressBookError::Validation(
            "full_name must not be empty".to_string(),
        ));
    }
    if phone.trim().is_empty() {
        return Err(AddressBookError::Validation(
            "phone must not be empty".to_string(),
        ));
    }
    if address.trim().is_empty() {
        return Err(AddressBookError::Validation(
            "address must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::addresses::MockAddressRepository;

    fn create_model() -> CreateAddressModel {
        CreateAddressModel {
            user_id: 3,
            full_name: "Alex".to_string(),
            phone: "0123".to_string(),
            address: "12 Main St".to_string(),
            city: "HCMC".to_string(),
            is_default: true,
        }
    }

    #[tokio::test]
    async fn create_passes_the_default_flag_through() {
        let mut address_repository = MockAddressRepository::new();
        address_repository
            .expect_insert()
            .withf(|address| address.is_default && address.user_id == 3)
            .times(1)
            .returning(|_| Ok(11));

        let usecase = AddressBookUseCase::new(Arc::new(address_repository));
        let address_id = usecase.create(create_model()).await.unwrap();

        assert_eq!(address_id, 11);
    }

    #[tokio::test]
    async fn create_rejects_blank_contact_fields() {
        let address_repository = MockAddressRepository::new();
        let usecase = AddressBookUseCase::new(Arc::new(address_repository));

        let mut model = create_model();
        model.phone = "  ".to_string();

        let err = usecase.create(model).await.unwrap_err();
        assert!(matches!(err, AddressBookError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_maps_missing_address_to_not_found() {
        let mut address_repository = MockAddressRepository::new();
        address_repository
            .expect_update()
            .times(1)
            .returning(|_, _| Ok(false));

        let usecase = AddressBookUseCase::new(Arc::new(address_repository));
        let model = UpdateAddressModel {
            user_id: 3,
            full_name: "Alex".to_string(),
            phone: "0123".to_string(),
            address: "12 Main St".to_string(),
            city: "HCMC".to_string(),
            is_default: false,
        };

        let err = usecase.update(99, model).await.unwrap_err();
        assert!(matches!(err, AddressBookError::NotFound));
    }

    #[tokio::test]
    async fn remove_is_scoped_to_the_owning_user() {
        let mut address_repository = MockAddressRepository::new();
        address_repository
            .expect_delete()
            .withf(|address_id, user_id| *address_id == 11 && *user_id == 3)
            .times(1)
            .returning(|_, _| Ok(true));

        let usecase = AddressBookUseCase::new(Arc::new(address_repository));
        usecase.remove(11, 3).await.unwrap();
    }
}
