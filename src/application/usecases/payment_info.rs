use std::sync::Arc;

use anyhow::anyhow;
use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, warn};
use url::Url;

use crate::config::config_model::PaymentConfig;
use crate::domain::entities::orders::OrderEntity;
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::value_objects::enums::payment_methods::PaymentMethod;
use crate::domain::value_objects::payments::PaymentInfoDto;

#[derive(Debug, Error)]
pub enum PaymentInfoError {
    #[error("order not found")]
    NotFound,
    #[error("unsupported payment method: {0}")]
    UnsupportedPaymentMethod(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentInfoError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentInfoError::NotFound => StatusCode::NOT_FOUND,
            PaymentInfoError::UnsupportedPaymentMethod(_) => StatusCode::BAD_REQUEST,
            PaymentInfoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct PaymentInfoUseCase<T>
where
    T: OrderRepository + Send + Sync,
{
    order_repository: Arc<T>,
    config: PaymentConfig,
}

impl<T> PaymentInfoUseCase<T>
where
    T: OrderRepository + Send + Sync,
{
    pub fn new(order_repository: Arc<T>, config: PaymentConfig) -> Self {
        Self {
            order_repository,
            config,
        }
    }

    /// Produces the payment instructions for one order. The transfer content
    /// `GEN{order_id}` is the reconciliation key the tracker later searches
    /// for in statement remarks.
    pub async fn resolve(&self, order_id: i64) -> Result<PaymentInfoDto, PaymentInfoError> {
        let order = self
            .order_repository
            .find_by_id(order_id)
            .await
            .map_err(|err| {
                error!(order_id, db_error = ?err, "payment info: failed to load order");
                PaymentInfoError::Internal(err)
            })?
            .ok_or(PaymentInfoError::NotFound)?;

        let payment_method = PaymentMethod::from_str(&order.payment_method).ok_or_else(|| {
            warn!(
                order_id,
                payment_method = %order.payment_method,
                "payment info: order carries an unknown payment method"
            );
            PaymentInfoError::UnsupportedPaymentMethod(order.payment_method.clone())
        })?;

        let reference = format!("GEN{}", order_id);
        let remaining_secs = self.remaining_timeout(&order);

        let mut info = PaymentInfoDto {
            amount: order.total_amount,
            order_id,
            return_url: format!("{}/order-confirmation/{}", self.config.website_url, order_id),
            notify_url: format!("{}/api/payment-callback", self.config.website_url),
            payment_method: order.payment_method.clone(),
            payment_status: order.payment_status.clone(),
            link_qr: None,
            account_holder: None,
            account_number: None,
            bank_name: None,
            transfer_content: None,
            order_timeout: None,
        };

        match payment_method {
            PaymentMethod::BankTransfer => {
                info.link_qr = Some(self.bank_qr_link(order.total_amount, &reference)?);
                info.account_holder = Some(self.config.bank.account_holder.clone());
                info.account_number = Some(self.config.bank.account_number.clone());
                info.bank_name = Some(self.config.bank.bank_name.clone());
                info.transfer_content = Some(reference);
                info.order_timeout = Some(remaining_secs);
            }
            PaymentMethod::Momo => {
                info.link_qr = Some(self.momo_qr_link(order.total_amount, &reference)?);
                info.account_holder = Some(self.config.momo.account_holder.clone());
                info.account_number = Some(self.config.momo.account_number.clone());
                info.transfer_content = Some(reference);
                info.order_timeout = Some(remaining_secs);
            }
            PaymentMethod::Cod => {}
        }

        Ok(info)
    }

    fn remaining_timeout(&self, order: &OrderEntity) -> i64 {
        let elapsed = (Utc::now() - order.created_at).num_seconds();
        (self.config.order_timeout_secs - elapsed).max(0)
    }

    fn bank_qr_link(&self, amount: i64, reference: &str) -> Result<String, PaymentInfoError> {
        let base = Url::parse(&self.config.bank.qr_base_url)
            .map_err(|err| PaymentInfoError::Internal(anyhow!(err)))?;
        let mut url = base
            .join(&format!(
                "{}/{}/{}/{}/qr_only.png",
                self.config.bank.short_name,
                self.config.bank.account_number,
                amount,
                reference
            ))
            .map_err(|err| PaymentInfoError::Internal(anyhow!(err)))?;
        url.query_pairs_mut()
            .append_pair("accountName", &self.config.bank.account_holder);
        Ok(url.to_string())
    }

    fn momo_qr_link(&self, amount: i64, reference: &str) -> Result<String, PaymentInfoError> {
        let base = Url::parse(&self.config.momo.qr_base_url)
            .map_err(|err| PaymentInfoError::Internal(anyhow!(err)))?;
        let mut url = base
            .join("api/QRCode")
            .map_err(|err| PaymentInfoError::Internal(anyhow!(err)))?;
        url.query_pairs_mut()
            .append_pair("phone", &self.config.momo.account_number)
            .append_pair("amount", &amount.to_string())
            .append_pair("note", reference);
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_model::{BankAccount, StatementApi, WalletAccount};
    use crate::domain::repositories::orders::MockOrderRepository;

    fn test_config() -> PaymentConfig {
        PaymentConfig {
            website_url: "https://shop.example.com".to_string(),
            order_timeout_secs: 1800,
            bank: BankAccount {
                short_name: "acb".to_string(),
                account_number: "11122233".to_string(),
                account_holder: "GEN STORE".to_string(),
                bank_name: "ACB".to_string(),
                qr_base_url: "https://api.vietqr.io".to_string(),
            },
            momo: WalletAccount {
                account_number: "0900000000".to_string(),
                account_holder: "GEN STORE".to_string(),
                qr_base_url: "https://momosv3.apimienphi.com".to_string(),
            },
            statement: StatementApi {
                base_url: "https://statement.example.com".to_string(),
                access_token: "token".to_string(),
            },
        }
    }

    fn order_fixture(order_id: i64, payment_method: &str, payment_status: &str) -> OrderEntity {
        OrderEntity {
            id: order_id,
            user_id: 3,
            shipping_address_id: Some(9),
            total_amount: 2000,
            discount_type: "fixed_amount".to_string(),
            discount_value: 0,
            status: "pending".to_string(),
            payment_method: payment_method.to_string(),
            payment_status: payment_status.to_string(),
            transaction_id: "tx-1".to_string(),
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn bank_transfer_info_carries_qr_and_transfer_content() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_find_by_id()
            .times(1)
            .returning(|order_id| Ok(Some(order_fixture(order_id, "bank_transfer", "pending"))));

        let usecase = PaymentInfoUseCase::new(Arc::new(order_repository), test_config());
        let info = usecase.resolve(42).await.unwrap();

        assert_eq!(info.transfer_content.as_deref(), Some("GEN42"));
        assert_eq!(info.bank_name.as_deref(), Some("ACB"));
        assert_eq!(info.account_number.as_deref(), Some("11122233"));
        let link = info.link_qr.unwrap();
        assert!(link.contains("/acb/11122233/2000/GEN42/qr_only.png"));
        let timeout = info.order_timeout.unwrap();
        assert!(timeout > 0 && timeout <= 1800);
        assert_eq!(
            info.return_url,
            "https://shop.example.com/order-confirmation/42"
        );
    }

    #[tokio::test]
    async fn momo_info_uses_the_wallet_qr_template() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_find_by_id()
            .times(1)
            .returning(|order_id| Ok(Some(order_fixture(order_id, "momo", "pending"))));

        let usecase = PaymentInfoUseCase::new(Arc::new(order_repository), test_config());
        let info = usecase.resolve(8).await.unwrap();

        let link = info.link_qr.unwrap();
        assert!(link.contains("phone=0900000000"));
        assert!(link.contains("note=GEN8"));
        assert!(info.bank_name.is_none());
    }

    #[tokio::test]
    async fn cod_info_has_no_transfer_instructions() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_find_by_id()
            .times(1)
            .returning(|order_id| Ok(Some(order_fixture(order_id, "cod", "completed"))));

        let usecase = PaymentInfoUseCase::new(Arc::new(order_repository), test_config());
        let info = usecase.resolve(5).await.unwrap();

        assert!(info.link_qr.is_none());
        assert!(info.transfer_content.is_none());
        assert!(info.order_timeout.is_none());
        assert_eq!(info.payment_status, "completed");
    }

    #[tokio::test]
    async fn unknown_stored_method_is_refused() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_find_by_id()
            .times(1)
            .returning(|order_id| Ok(Some(order_fixture(order_id, "paypal", "pending"))));

        let usecase = PaymentInfoUseCase::new(Arc::new(order_repository), test_config());
        let err = usecase.resolve(5).await.unwrap_err();

        assert!(matches!(err, PaymentInfoError::UnsupportedPaymentMethod(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let mut order_repository = MockOrderRepository::new();
        order_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let usecase = PaymentInfoUseCase::new(Arc::new(order_repository), test_config());
        let err = usecase.resolve(404).await.unwrap_err();

        assert!(matches!(err, PaymentInfoError::NotFound));
    }
}
