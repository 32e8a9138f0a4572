use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::orders::InsertOrderEntity;
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::value_objects::enums::discount_types::DiscountType;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::payment_methods::PaymentMethod;
use crate::domain::value_objects::enums::payment_record_statuses::PaymentRecordStatus;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::domain::value_objects::orders::{
    CreateOrderModel, CreateOrderResponse, OrderItemDraft, OrderWriteDenied,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("{0}")]
    Validation(String),
    #[error("product {0} not found")]
    ProductNotFound(i64),
    #[error("insufficient stock for product {0}")]
    InsufficientStock(i64),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CheckoutError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::Validation(_) | CheckoutError::InsufficientStock(_) => {
                StatusCode::BAD_REQUEST
            }
            CheckoutError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            CheckoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct CheckoutUseCase<T>
where
    T: OrderRepository + Send + Sync,
{
    order_repository: Arc<T>,
}

impl<T> CheckoutUseCase<T>
where
    T: OrderRepository + Send + Sync,
{
    pub fn new(order_repository: Arc<T>) -> Self {
        Self { order_repository }
    }

    pub async fn create_order(
        &self,
        model: CreateOrderModel,
    ) -> Result<CreateOrderResponse, CheckoutError> {
        if model.items.is_empty() {
            return Err(CheckoutError::Validation(
                "order must contain at least one item".to_string(),
            ));
        }
        for item in &model.items {
            if item.quantity < 1 {
                return Err(CheckoutError::Validation(format!(
                    "invalid quantity for product {}",
                    item.product_id
                )));
            }
            if item.price < 0 {
                return Err(CheckoutError::Validation(format!(
                    "invalid price for product {}",
                    item.product_id
                )));
            }
        }
        if model.total_amount < 0 {
            return Err(CheckoutError::Validation(
                "total_amount must not be negative".to_string(),
            ));
        }
        if model.shipping_address_id <= 0 {
            return Err(CheckoutError::Validation(
                "shipping address is required".to_string(),
            ));
        }

        let payment_method = PaymentMethod::from_str(&model.payment_method).ok_or_else(|| {
            CheckoutError::Validation(format!(
                "unsupported payment method: {}",
                model.payment_method
            ))
        })?;

        // Cash on delivery is recorded as settled up front; the actual payment
        // is collected by the courier.
        let (payment_status, record_status) = match payment_method {
            PaymentMethod::Cod => (PaymentStatus::Completed, PaymentRecordStatus::Verified),
            _ => (PaymentStatus::Pending, PaymentRecordStatus::Unverified),
        };

        let transaction_id = Uuid::new_v4().to_string();
        let order = InsertOrderEntity {
            user_id: model.user_id,
            shipping_address_id: Some(model.shipping_address_id),
            total_amount: model.total_amount,
            discount_type: DiscountType::FixedAmount.to_string(),
            discount_value: 0,
            status: OrderStatus::Pending.to_string(),
            payment_method: payment_method.to_string(),
            payment_status: payment_status.to_string(),
            transaction_id: transaction_id.clone(),
            note: model.note.clone(),
        };
        let items: Vec<OrderItemDraft> = model
            .items
            .iter()
            .map(|item| OrderItemDraft {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        info!(
            user_id = model.user_id,
            payment_method = %payment_method,
            item_count = items.len(),
            total_amount = model.total_amount,
            "checkout: creating order"
        );

        let order_id = self
            .order_repository
            .create(order, items, record_status)
            .await
            .map_err(|err| match err.downcast_ref::<OrderWriteDenied>() {
                Some(OrderWriteDenied::InsufficientStock(product_id)) => {
                    warn!(
                        user_id = model.user_id,
                        product_id, "checkout: rejected, insufficient stock"
                    );
                    CheckoutError::InsufficientStock(*product_id)
                }
                Some(OrderWriteDenied::ProductNotFound(product_id)) => {
                    warn!(
                        user_id = model.user_id,
                        product_id, "checkout: rejected, unknown product"
                    );
                    CheckoutError::ProductNotFound(*product_id)
                }
                _ => {
                    error!(
                        user_id = model.user_id,
                        db_error = ?err,
                        "checkout: order creation failed"
                    );
                    CheckoutError::Internal(err)
                }
            })?;

        info!(order_id, "checkout: order created");

        Ok(CreateOrderResponse {
            order_id,
            transaction_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::orders::MockOrderRepository;
    use crate::domain::value_objects::orders::OrderItemModel;

    fn valid_model(payment_method: &str) -> CreateOrderModel {
        CreateOrderModel {
            user_id: 3,
            shipping_address_id: 9,
            items: vec![OrderItemModel {
                product_id: 1,
                quantity: 2,
                price: 1000,
            }],
            total_amount: 2000,
            payment_method: payment_method.to_string(),
            note: None,
        }
    }

    #[tokio::test]
    async fn bank_transfer_order_starts_pending_with_unverified_record() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_create()
            .withf(|order, items, record_status| {
                order.status == "pending"
                    && order.payment_status == "pending"
                    && order.payment_method == "bank_transfer"
                    && !order.transaction_id.is_empty()
                    && items.len() == 1
                    && items[0].quantity == 2
                    && *record_status == PaymentRecordStatus::Unverified
            })
            .times(1)
            .returning(|_, _, _| Ok(42));

        let usecase = CheckoutUseCase::new(Arc::new(order_repository));
        let response = usecase
            .create_order(valid_model("bank_transfer"))
            .await
            .unwrap();

        assert_eq!(response.order_id, 42);
        assert!(Uuid::parse_str(&response.transaction_id).is_ok());
    }

    #[tokio::test]
    async fn cod_order_is_recorded_as_completed() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_create()
            .withf(|order, _, record_status| {
                order.payment_status == "completed"
                    && *record_status == PaymentRecordStatus::Verified
            })
            .times(1)
            .returning(|_, _, _| Ok(7));

        let usecase = CheckoutUseCase::new(Arc::new(order_repository));
        let response = usecase.create_order(valid_model("cod")).await.unwrap();

        assert_eq!(response.order_id, 7);
    }

    #[tokio::test]
    async fn empty_item_list_is_rejected_before_any_write() {
        let order_repository = MockOrderRepository::new();

        let usecase = CheckoutUseCase::new(Arc::new(order_repository));
        let mut model = valid_model("bank_transfer");
        model.items.clear();

        let err = usecase.create_order(model).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_payment_method_is_rejected() {
        let order_repository = MockOrderRepository::new();

        let usecase = CheckoutUseCase::new(Arc::new(order_repository));
        let err = usecase
            .create_order(valid_model("paypal"))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Validation(_)));
    }

    #[tokio::test]
    async fn stock_shortfall_aborts_the_whole_checkout() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_create()
            .times(1)
            .returning(|_, _, _| Err(OrderWriteDenied::InsufficientStock(1).into()));

        let usecase = CheckoutUseCase::new(Arc::new(order_repository));
        let err = usecase
            .create_order(valid_model("bank_transfer"))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::InsufficientStock(1)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
