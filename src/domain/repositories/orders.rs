use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::payment_record_statuses::PaymentRecordStatus;
use crate::domain::value_objects::orders::{
    OrderDetailDto, OrderItemDraft, OrderOverwrite, OrderStatsDto,
};

#[automock]
#[async_trait]
pub trait OrderRepository {
    /// Creates the order, its items, the guarded stock decrements, the cart
    /// cleanup and the initial payment record as one transaction. Refusals
    /// surface as `OrderWriteDenied` inside the error chain.
    async fn create(
        &self,
        order: InsertOrderEntity,
        items: Vec<OrderItemDraft>,
        record_status: PaymentRecordStatus,
    ) -> Result<i64>;

    async fn find_by_id(&self, order_id: i64) -> Result<Option<OrderEntity>>;

    async fn detail(&self, order_id: i64) -> Result<Option<OrderDetailDto>>;

    async fn list_details(&self) -> Result<Vec<OrderDetailDto>>;

    /// Full replacement of one order (scalars, address upsert, item set) in
    /// one transaction.
    async fn overwrite(&self, order_id: i64, overwrite: OrderOverwrite) -> Result<()>;

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<bool>;

    async fn stats(&self) -> Result<OrderStatsDto>;
}
