use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::repositories::payment_records::PaymentRecordRepository;
use crate::domain::value_objects::enums::payment_record_statuses::PaymentRecordStatus;
use crate::domain::value_objects::payments::{PaymentCheckDto, StatementTransaction};
use crate::infrastructure::statement_api::client::StatementApiClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatementGateway: Send + Sync {
    async fn recent_transactions(&self) -> AnyResult<Vec<StatementTransaction>>;
}

#[async_trait]
impl StatementGateway for StatementApiClient {
    async fn recent_transactions(&self) -> AnyResult<Vec<StatementTransaction>> {
        self.fetch_transactions().await
    }
}

#[derive(Debug, Error)]
pub enum PaymentTrackingError {
    #[error("payment record not found")]
    NotFound,
    #[error("payment status could not be verified")]
    CheckFailed,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentTrackingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentTrackingError::NotFound => StatusCode::NOT_FOUND,
            // Distinct from "not paid yet": the statement API could not be
            // consulted, so the caller should retry.
            PaymentTrackingError::CheckFailed => StatusCode::BAD_GATEWAY,
            PaymentTrackingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Matches the reference only as a delimited token, so the reference of
/// order 1 can never match inside order 12's remark.
fn remark_contains_reference(remark: &str, reference: &str) -> bool {
    let mut search_from = 0;
    while let Some(pos) = remark[search_from..].find(reference) {
        let start = search_from + pos;
        let end = start + reference.len();

        let boundary_before = remark[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_ascii_alphanumeric());
        let boundary_after = remark[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_ascii_alphanumeric());

        if boundary_before && boundary_after {
            return true;
        }
        search_from = start + 1;
    }
    false
}

pub struct PaymentTrackingUseCase<R, G>
where
    R: PaymentRecordRepository + Send + Sync,
    G: StatementGateway + Send + Sync,
{
    record_repository: Arc<R>,
    statement_gateway: Arc<G>,
    order_timeout_secs: i64,
}

impl<R, G> PaymentTrackingUseCase<R, G>
where
    R: PaymentRecordRepository + Send + Sync,
    G: StatementGateway + Send + Sync,
{
    pub fn new(
        record_repository: Arc<R>,
        statement_gateway: Arc<G>,
        order_timeout_secs: i64,
    ) -> Self {
        Self {
            record_repository,
            statement_gateway,
            order_timeout_secs,
        }
    }

    /// Checks whether the payment for one order has arrived. Verified records
    /// short-circuit without touching the statement API.
    pub async fn check(&self, order_id: i64) -> Result<PaymentCheckDto, PaymentTrackingError> {
        let record = self
            .record_repository
            .find_by_order(order_id)
            .await
            .map_err(|err| {
                error!(order_id, db_error = ?err, "payment tracking: failed to load record");
                PaymentTrackingError::Internal(err)
            })?
            .ok_or(PaymentTrackingError::NotFound)?;

        let elapsed = (Utc::now() - record.created_at).num_seconds();
        let remaining_secs = (self.order_timeout_secs - elapsed).max(0);

        if PaymentRecordStatus::from_str(&record.status) == Some(PaymentRecordStatus::Verified) {
            return Ok(PaymentCheckDto {
                is_paid: true,
                transaction_id: record.transaction_id,
                remaining_secs,
            });
        }

        let transactions = self
            .statement_gateway
            .recent_transactions()
            .await
            .map_err(|err| {
                warn!(
                    order_id,
                    error = ?err,
                    "payment tracking: statement api unavailable"
                );
                PaymentTrackingError::CheckFailed
            })?;

        let reference = format!("GEN{}", order_id);
        let matched = transactions.iter().find(|transaction| {
            transaction.amount >= record.amount
                && remark_contains_reference(&transaction.remark, &reference)
        });

        match matched {
            Some(transaction) => {
                self.record_repository
                    .confirm_paid(order_id)
                    .await
                    .map_err(|err| {
                        error!(
                            order_id,
                            db_error = ?err,
                            "payment tracking: failed to persist confirmation"
                        );
                        PaymentTrackingError::Internal(err)
                    })?;

                info!(
                    order_id,
                    matched_transaction_id = %transaction.transaction_id,
                    "payment tracking: payment confirmed"
                );

                Ok(PaymentCheckDto {
                    is_paid: true,
                    transaction_id: transaction.transaction_id.clone(),
                    remaining_secs,
                })
            }
            None => Ok(PaymentCheckDto {
                is_paid: false,
                transaction_id: record.transaction_id,
                remaining_secs,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::payment_records::PaymentRecordEntity;
    use crate::domain::repositories::payment_records::MockPaymentRecordRepository;
    use anyhow::anyhow;
    use chrono::Duration;

    const TIMEOUT_SECS: i64 = 1800;

    fn record_fixture(order_id: i64, status: &str) -> PaymentRecordEntity {
        PaymentRecordEntity {
            order_id,
            amount: 2000,
            status: status.to_string(),
            transaction_id: "minted-token".to_string(),
            created_at: Utc::now(),
        }
    }

    fn statement(amount: i64, remark: &str, transaction_id: &str) -> StatementTransaction {
        StatementTransaction {
            amount,
            remark: remark.to_string(),
            transaction_id: transaction_id.to_string(),
        }
    }

    #[test]
    fn reference_must_be_a_delimited_token() {
        assert!(remark_contains_reference("thanh toan GEN42", "GEN42"));
        assert!(remark_contains_reference("GEN42", "GEN42"));
        assert!(remark_contains_reference("pay GEN42.", "GEN42"));
        assert!(remark_contains_reference("xGEN421 GEN42", "GEN42"));
        assert!(!remark_contains_reference("GEN421", "GEN42"));
        assert!(!remark_contains_reference("xGEN42", "GEN42"));
        assert!(!remark_contains_reference("no reference here", "GEN42"));
    }

    #[tokio::test]
    async fn verified_record_short_circuits_without_external_call() {
        let mut record_repository = MockPaymentRecordRepository::new();
        record_repository
            .expect_find_by_order()
            .times(1)
            .returning(|order_id| Ok(Some(record_fixture(order_id, "verified"))));
        // No expectation on the gateway: any call would panic.
        let statement_gateway = MockStatementGateway::new();

        let usecase = PaymentTrackingUseCase::new(
            Arc::new(record_repository),
            Arc::new(statement_gateway),
            TIMEOUT_SECS,
        );
        let check = usecase.check(42).await.unwrap();

        assert!(check.is_paid);
        assert_eq!(check.transaction_id, "minted-token");
    }

    #[tokio::test]
    async fn matching_statement_confirms_the_payment() {
        let mut record_repository = MockPaymentRecordRepository::new();
        record_repository
            .expect_find_by_order()
            .times(1)
            .returning(|order_id| Ok(Some(record_fixture(order_id, "unverified"))));
        record_repository
            .expect_confirm_paid()
            .withf(|order_id| *order_id == 42)
            .times(1)
            .returning(|_| Ok(()));

        let mut statement_gateway = MockStatementGateway::new();
        statement_gateway.expect_recent_transactions().times(1).returning(|| {
            Ok(vec![
                statement(500, "unrelated GEN7", "t-1"),
                statement(2000, "chuyen khoan GEN42", "t-2"),
            ])
        });

        let usecase = PaymentTrackingUseCase::new(
            Arc::new(record_repository),
            Arc::new(statement_gateway),
            TIMEOUT_SECS,
        );
        let check = usecase.check(42).await.unwrap();

        assert!(check.is_paid);
        assert_eq!(check.transaction_id, "t-2");
    }

    #[tokio::test]
    async fn neighbouring_order_reference_does_not_match() {
        let mut record_repository = MockPaymentRecordRepository::new();
        record_repository
            .expect_find_by_order()
            .times(1)
            .returning(|order_id| Ok(Some(record_fixture(order_id, "unverified"))));

        let mut statement_gateway = MockStatementGateway::new();
        statement_gateway
            .expect_recent_transactions()
            .times(1)
            .returning(|| Ok(vec![statement(5000, "chuyen khoan GEN421", "t-9")]));

        let usecase = PaymentTrackingUseCase::new(
            Arc::new(record_repository),
            Arc::new(statement_gateway),
            TIMEOUT_SECS,
        );
        let check = usecase.check(42).await.unwrap();

        assert!(!check.is_paid);
        assert_eq!(check.transaction_id, "minted-token");
    }

    #[tokio::test]
    async fn short_amount_does_not_match() {
        let mut record_repository = MockPaymentRecordRepository::new();
        record_repository
            .expect_find_by_order()
            .times(1)
            .returning(|order_id| Ok(Some(record_fixture(order_id, "unverified"))));

        let mut statement_gateway = MockStatementGateway::new();
        statement_gateway
            .expect_recent_transactions()
            .times(1)
            .returning(|| Ok(vec![statement(1999, "GEN42", "t-3")]));

        let usecase = PaymentTrackingUseCase::new(
            Arc::new(record_repository),
            Arc::new(statement_gateway),
            TIMEOUT_SECS,
        );
        let check = usecase.check(42).await.unwrap();

        assert!(!check.is_paid);
    }

    #[tokio::test]
    async fn every_unpaid_check_consults_the_statement_api() {
        let mut record_repository = MockPaymentRecordRepository::new();
        record_repository
            .expect_find_by_order()
            .times(2)
            .returning(|order_id| Ok(Some(record_fixture(order_id, "unverified"))));

        let mut statement_gateway = MockStatementGateway::new();
        statement_gateway
            .expect_recent_transactions()
            .times(2)
            .returning(|| Ok(vec![]));

        let usecase = PaymentTrackingUseCase::new(
            Arc::new(record_repository),
            Arc::new(statement_gateway),
            TIMEOUT_SECS,
        );

        assert!(!usecase.check(42).await.unwrap().is_paid);
        assert!(!usecase.check(42).await.unwrap().is_paid);
    }

    #[tokio::test]
    async fn gateway_failure_is_a_distinct_outcome() {
        let mut record_repository = MockPaymentRecordRepository::new();
        record_repository
            .expect_find_by_order()
            .times(1)
            .returning(|order_id| Ok(Some(record_fixture(order_id, "unverified"))));

        let mut statement_gateway = MockStatementGateway::new();
        statement_gateway
            .expect_recent_transactions()
            .times(1)
            .returning(|| Err(anyhow!("connection refused")));

        let usecase = PaymentTrackingUseCase::new(
            Arc::new(record_repository),
            Arc::new(statement_gateway),
            TIMEOUT_SECS,
        );
        let err = usecase.check(42).await.unwrap_err();

        assert!(matches!(err, PaymentTrackingError::CheckFailed));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let mut record_repository = MockPaymentRecordRepository::new();
        record_repository
            .expect_find_by_order()
            .times(1)
            .returning(|_| Ok(None));

        let statement_gateway = MockStatementGateway::new();
        let usecase = PaymentTrackingUseCase::new(
            Arc::new(record_repository),
            Arc::new(statement_gateway),
            TIMEOUT_SECS,
        );

        let err = usecase.check(404).await.unwrap_err();
        assert!(matches!(err, PaymentTrackingError::NotFound));
    }

    #[tokio::test]
    async fn expired_record_reports_zero_remaining_time() {
        let mut record_repository = MockPaymentRecordRepository::new();
        record_repository.expect_find_by_order().times(1).returning(|order_id| {
            let mut record = record_fixture(order_id, "unverified");
            record.created_at = Utc::now() - Duration::seconds(TIMEOUT_SECS + 60);
            Ok(Some(record))
        });

        let mut statement_gateway = MockStatementGateway::new();
        statement_gateway
            .expect_recent_transactions()
            .times(1)
            .returning(|| Ok(vec![]));

        let usecase = PaymentTrackingUseCase::new(
            Arc::new(record_repository),
            Arc::new(statement_gateway),
            TIMEOUT_SECS,
        );
        let check = usecase.check(42).await.unwrap();

        assert_eq!(check.remaining_secs, 0);
    }
}
