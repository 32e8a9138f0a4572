use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{error, info};

use crate::domain::entities::cart_items::InsertCartItemEntity;
use crate::domain::repositories::carts::CartRepository;
use crate::domain::value_objects::carts::{AddCartItemModel, CartLineDto};

#[derive(Debug, Error)]
pub enum CartError {
    #[error("{0}")]
    Validation(String),
    #[error("cart item not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CartError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CartError::Validation(_) => StatusCode::BAD_REQUEST,
            CartError::NotFound => StatusCode::NOT_FOUND,
            CartError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct CartUseCase<T>
where
    T: CartRepository + Send + Sync,
{
    cart_repository: Arc<T>,
}

impl<T> CartUseCase<T>
where
    T: CartRepository + Send + Sync,
{
    pub fn new(cart_repository: Arc<T>) -> Self {
        Self { cart_repository }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<CartLineDto>, CartError> {
        let lines = self
            .cart_repository
            .list_by_user(user_id)
            .await
            .map_err(|err| {
                error!(user_id, db_error = ?err, "cart: failed to list");
                CartError::Internal(err)
            })?;
        Ok(lines)
    }

    pub async fn add(&self, model: AddCartItemModel) -> Result<(), CartError> {
        if model.quantity < 1 {
            return Err(CartError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }

        self.cart_repository
            .add(InsertCartItemEntity {
                user_id: model.user_id,
                product_id: model.product_id,
                quantity: model.quantity,
            })
            .await
            .map_err(|err| {
                error!(
                    user_id = model.user_id,
                    product_id = model.product_id,
                    db_error = ?err,
                    "cart: add failed"
                );
                CartError::Internal(err)
            })?;

        info!(
            user_id = model.user_id,
            product_id = model.product_id,
            quantity = model.quantity,
            "cart: item added"
        );
        Ok(())
    }

    pub async fn set_quantity(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }

        let updated = self
            .cart_repository
            .set_quantity(user_id, product_id, quantity)
            .await
            .map_err(|err| {
                error!(user_id, product_id, db_error = ?err, "cart: update failed");
                CartError::Internal(err)
            })?;

        if !updated {
            return Err(CartError::NotFound);
        }
        Ok(())
    }

    pub async fn remove(&self, user_id: i64, product_id: i64) -> Result<(), CartError> {
        let removed = self
            .cart_repository
            .remove(user_id, product_id)
            .await
            .map_err(|err| {
                error!(user_id, product_id, db_error = ?err, "cart: remove failed");
                CartError::Internal(err)
            })?;

        if !removed {
            return Err(CartError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::carts::MockCartRepository;

    #[tokio::test]
    async fn add_rejects_non_positive_quantities() {
        let cart_repository = MockCartRepository::new();
        let usecase = CartUseCase::new(Arc::new(cart_repository));

        let err = usecase
            .add(AddCartItemModel {
                user_id: 3,
                product_id: 1,
                quantity: 0,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CartError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn add_forwards_the_upsert_to_the_repository() {
        let mut cart_repository = MockCartRepository::new();
        cart_repository
            .expect_add()
            .withf(|item| item.user_id == 3 && item.product_id == 1 && item.quantity == 2)
            .times(1)
            .returning(|_| Ok(()));

        let usecase = CartUseCase::new(Arc::new(cart_repository));
        usecase
            .add(AddCartItemModel {
                user_id: 3,
                product_id: 1,
                quantity: 2,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn set_quantity_maps_missing_rows_to_not_found() {
        let mut cart_repository = MockCartRepository::new();
        cart_repository
            .expect_set_quantity()
            .times(1)
            .returning(|_, _, _| Ok(false));

        let usecase = CartUseCase::new(Arc::new(cart_repository));
        let err = usecase.set_quantity(3, 99, 2).await.unwrap_err();

        assert!(matches!(err, CartError::NotFound));
    }

    #[tokio::test]
    async fn remove_succeeds_when_the_row_existed() {
        let mut cart_repository = MockCartRepository::new();
        cart_repository
            .expect_remove()
            .times(1)
            .returning(|_, _| Ok(true));

        let usecase = CartUseCase::new(Arc::new(cart_repository));
        usecase.remove(3, 1).await.unwrap();
    }
}
