use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::payment_records::PaymentRecordEntity;

#[automock]
#[async_trait]
pub trait PaymentRecordRepository {
    async fn find_by_order(&self, order_id: i64) -> Result<Option<PaymentRecordEntity>>;

    /// Flips the record to `verified` and the order to paid/completed in one
    /// transaction. Idempotent: re-running on a verified record is a no-op.
    async fn confirm_paid(&self, order_id: i64) -> Result<()>;
}
