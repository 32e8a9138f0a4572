use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::repositories::orders::OrderRepository;
use crate::domain::value_objects::enums::discount_types::DiscountType;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::payment_methods::PaymentMethod;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::domain::value_objects::orders::{
    OrderDetailDto, OrderItemDraft, OrderOverwrite, OrderStatsDto, OrderWriteDenied,
    ShippingContactUpdate, UpdateOrderModel,
};

#[derive(Debug, Error)]
pub enum OrderAdminError {
    #[error("{0}")]
    Validation(String),
    #[error("order not found")]
    NotFound,
    #[error("cannot cancel a delivered order")]
    CannotCancelDelivered,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl OrderAdminError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderAdminError::Validation(_) | OrderAdminError::CannotCancelDelivered => {
                StatusCode::BAD_REQUEST
            }
            OrderAdminError::NotFound => StatusCode::NOT_FOUND,
            OrderAdminError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct OrderAdminUseCase<T>
where
    T: OrderRepository + Send + Sync,
{
    order_repository: Arc<T>,
}

impl<T> OrderAdminUseCase<T>
where
    T: OrderRepository + Send + Sync,
{
    pub fn new(order_repository: Arc<T>) -> Self {
        Self { order_repository }
    }

    pub async fn get_order(&self, order_id: i64) -> Result<OrderDetailDto, OrderAdminError> {
        self.order_repository
            .detail(order_id)
            .await
            .map_err(|err| {
                error!(order_id, db_error = ?err, "orders: failed to load order detail");
                OrderAdminError::Internal(err)
            })?
            .ok_or(OrderAdminError::NotFound)
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderDetailDto>, OrderAdminError> {
        let orders = self.order_repository.list_details().await.map_err(|err| {
            error!(db_error = ?err, "orders: failed to list orders");
            OrderAdminError::Internal(err)
        })?;
        Ok(orders)
    }

    pub async fn stats(&self) -> Result<OrderStatsDto, OrderAdminError> {
        let stats = self.order_repository.stats().await.map_err(|err| {
            error!(db_error = ?err, "orders: failed to compute stats");
            OrderAdminError::Internal(err)
        })?;
        Ok(stats)
    }

    pub async fn update_status(
        &self,
        order_id: i64,
        status: &str,
    ) -> Result<(), OrderAdminError> {
        let status = OrderStatus::from_str(status)
            .ok_or_else(|| OrderAdminError::Validation(format!("invalid status: {}", status)))?;

        let updated = self
            .order_repository
            .update_status(order_id, status)
            .await
            .map_err(|err| {
                error!(order_id, db_error = ?err, "orders: failed to update status");
                OrderAdminError::Internal(err)
            })?;

        if !updated {
            return Err(OrderAdminError::NotFound);
        }

        info!(order_id, status = %status, "orders: status updated");
        Ok(())
    }

    /// Cancelling is allowed from any status except `delivered`.
    pub async fn cancel(&self, order_id: i64) -> Result<(), OrderAdminError> {
        let order = self
            .order_repository
            .find_by_id(order_id)
            .await
            .map_err(OrderAdminError::Internal)?
            .ok_or(OrderAdminError::NotFound)?;

        if OrderStatus::from_str(&order.status) == Some(OrderStatus::Delivered) {
            warn!(order_id, "orders: refused to cancel a delivered order");
            return Err(OrderAdminError::CannotCancelDelivered);
        }

        let updated = self
            .order_repository
            .update_status(order_id, OrderStatus::Cancelled)
            .await
            .map_err(OrderAdminError::Internal)?;

        if !updated {
            return Err(OrderAdminError::NotFound);
        }

        info!(order_id, "orders: cancelled");
        Ok(())
    }

    /// Full replacement of an order: scalars, shipping address and the entire
    /// item set change together or not at all.
    pub async fn update_order(
        &self,
        order_id: i64,
        model: UpdateOrderModel,
    ) -> Result<(), OrderAdminError> {
        if model.items.is_empty() {
            return Err(OrderAdminError::Validation(
                "order must contain at least one item".to_string(),
            ));
        }
        for item in &model.items {
            if item.quantity < 1 || item.price < 0 {
                return Err(OrderAdminError::Validation(format!(
                    "invalid item data for product {}",
                    item.product_id
                )));
            }
        }

        let status = OrderStatus::from_str(&model.status).ok_or_else(|| {
            OrderAdminError::Validation(format!("invalid status: {}", model.status))
        })?;
        let payment_method = PaymentMethod::from_str(&model.payment_method).ok_or_else(|| {
            OrderAdminError::Validation(format!(
                "unsupported payment method: {}",
                model.payment_method
            ))
        })?;
        let payment_status = match &model.payment_status {
            Some(value) => PaymentStatus::from_str(value).ok_or_else(|| {
                OrderAdminError::Validation(format!("invalid payment status: {}", value))
            })?,
            None => PaymentStatus::Pending,
        };
        // Cash on delivery is always recorded as settled.
        let payment_status = match payment_method {
            PaymentMethod::Cod => PaymentStatus::Completed,
            _ => payment_status,
        };
        let discount_type = match &model.discount_type {
            Some(value) => DiscountType::from_str(value).ok_or_else(|| {
                OrderAdminError::Validation(format!("invalid discount type: {}", value))
            })?,
            None => DiscountType::FixedAmount,
        };

        // Shipping contact fields travel together: a partial payload would
        // blank out the fields it omits.
        let shipping = match (
            &model.customer_name,
            &model.customer_phone,
            &model.address,
            &model.city,
        ) {
            (None, None, None, None) => None,
            (Some(full_name), Some(phone), Some(address), city) => Some(ShippingContactUpdate {
                user_id: model.user_id,
                full_name: full_name.clone(),
                phone: phone.clone(),
                address: address.clone(),
                city: city.clone().unwrap_or_default(),
            }),
            _ => {
                return Err(OrderAdminError::Validation(
                    "customer_name, customer_phone and address must be provided together"
                        .to_string(),
                ));
            }
        };

        let overwrite = OrderOverwrite {
            total_amount: model.total_amount,
            discount_type: discount_type.to_string(),
            discount_value: model.discount_value.unwrap_or(0),
            status: status.to_string(),
            payment_method: payment_method.to_string(),
            payment_status: payment_status.to_string(),
            note: model.note.clone(),
            shipping_address_id: model.shipping_address_id,
            shipping,
            items: model
                .items
                .iter()
                .map(|item| OrderItemDraft {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
        };

        self.order_repository
            .overwrite(order_id, overwrite)
            .await
            .map_err(|err| match err.downcast_ref::<OrderWriteDenied>() {
                Some(OrderWriteDenied::OrderNotFound) => OrderAdminError::NotFound,
                _ => {
                    error!(order_id, db_error = ?err, "orders: full update failed");
                    OrderAdminError::Internal(err)
                }
            })?;

        info!(order_id, "orders: full update applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::orders::OrderEntity;
    use crate::domain::repositories::orders::MockOrderRepository;
    use crate::domain::value_objects::orders::OrderItemModel;
    use chrono::Utc;

    fn order_fixture(order_id: i64, status: &str) -> OrderEntity {
        OrderEntity {
            id: order_id,
            user_id: 3,
            shipping_address_id: Some(9),
            total_amount: 2000,
            discount_type: "fixed_amount".to_string(),
            discount_value: 0,
            status: status.to_string(),
            payment_method: "bank_transfer".to_string(),
            payment_status: "pending".to_string(),
            transaction_id: "tx-1".to_string(),
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn update_model(payment_method: &str) -> UpdateOrderModel {
        UpdateOrderModel {
            items: vec![OrderItemModel {
                product_id: 1,
                quantity: 1,
                price: 1500,
            }],
            total_amount: 1500,
            status: "shipped".to_string(),
            payment_method: payment_method.to_string(),
            payment_status: Some("pending".to_string()),
            discount_type: Some("percentage".to_string()),
            discount_value: Some(10),
            note: None,
            shipping_address_id: Some(9),
            user_id: Some(3),
            customer_name: Some("Alex".to_string()),
            customer_phone: Some("0123".to_string()),
            address: Some("12 Main St".to_string()),
            city: Some("HCMC".to_string()),
        }
    }

    #[tokio::test]
    async fn cancel_refuses_delivered_orders() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_find_by_id()
            .times(1)
            .returning(|order_id| Ok(Some(order_fixture(order_id, "delivered"))));

        let usecase = OrderAdminUseCase::new(Arc::new(order_repository));
        let err = usecase.cancel(5).await.unwrap_err();

        assert!(matches!(err, OrderAdminError::CannotCancelDelivered));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cancel_succeeds_from_any_other_status() {
        for status in ["pending", "paid", "shipped", "cancelled"] {
            let mut order_repository = MockOrderRepository::new();
            let status_owned = status.to_string();
            order_repository
                .expect_find_by_id()
                .times(1)
                .returning(move |order_id| Ok(Some(order_fixture(order_id, &status_owned))));
            order_repository
                .expect_update_status()
                .withf(|_, status| *status == OrderStatus::Cancelled)
                .times(1)
                .returning(|_, _| Ok(true));

            let usecase = OrderAdminUseCase::new(Arc::new(order_repository));
            usecase.cancel(5).await.unwrap();
        }
    }

    #[tokio::test]
    async fn update_status_rejects_unknown_values() {
        let order_repository = MockOrderRepository::new();
        let usecase = OrderAdminUseCase::new(Arc::new(order_repository));

        let err = usecase.update_status(5, "teleported").await.unwrap_err();
        assert!(matches!(err, OrderAdminError::Validation(_)));
    }

    #[tokio::test]
    async fn update_status_maps_missing_order_to_not_found() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_update_status()
            .times(1)
            .returning(|_, _| Ok(false));

        let usecase = OrderAdminUseCase::new(Arc::new(order_repository));
        let err = usecase.update_status(5, "shipped").await.unwrap_err();

        assert!(matches!(err, OrderAdminError::NotFound));
    }

    #[tokio::test]
    async fn full_update_rejects_an_empty_item_list() {
        let order_repository = MockOrderRepository::new();
        let usecase = OrderAdminUseCase::new(Arc::new(order_repository));

        let mut model = update_model("bank_transfer");
        model.items.clear();

        let err = usecase.update_order(5, model).await.unwrap_err();
        assert!(matches!(err, OrderAdminError::Validation(_)));
    }

    #[tokio::test]
    async fn full_update_rejects_a_partial_shipping_contact() {
        let order_repository = MockOrderRepository::new();
        let usecase = OrderAdminUseCase::new(Arc::new(order_repository));

        let mut model = update_model("bank_transfer");
        model.customer_phone = None;
        model.address = None;
        model.city = None;

        let err = usecase.update_order(5, model).await.unwrap_err();
        assert!(matches!(err, OrderAdminError::Validation(_)));
    }

    #[tokio::test]
    async fn full_update_without_shipping_fields_carries_no_contact_update() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_overwrite()
            .withf(|_, overwrite| overwrite.shipping.is_none())
            .times(1)
            .returning(|_, _| Ok(()));

        let usecase = OrderAdminUseCase::new(Arc::new(order_repository));
        let mut model = update_model("bank_transfer");
        model.customer_name = None;
        model.customer_phone = None;
        model.address = None;
        model.city = None;

        usecase.update_order(5, model).await.unwrap();
    }

    #[tokio::test]
    async fn full_update_forces_cod_payment_status_to_completed() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_overwrite()
            .withf(|_, overwrite| {
                overwrite.payment_status == "completed"
                    && overwrite.payment_method == "cod"
                    && overwrite.items.len() == 1
                    && overwrite.shipping.is_some()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let usecase = OrderAdminUseCase::new(Arc::new(order_repository));
        usecase.update_order(5, update_model("cod")).await.unwrap();
    }

    #[tokio::test]
    async fn full_update_maps_missing_order_to_not_found() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_overwrite()
            .times(1)
            .returning(|_, _| Err(OrderWriteDenied::OrderNotFound.into()));

        let usecase = OrderAdminUseCase::new(Arc::new(order_repository));
        let err = usecase
            .update_order(5, update_model("bank_transfer"))
            .await
            .unwrap_err();

        assert!(matches!(err, OrderAdminError::NotFound));
    }
}
