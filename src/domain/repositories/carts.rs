use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::cart_items::InsertCartItemEntity;
use crate::domain::value_objects::carts::CartLineDto;

#[automock]
#[async_trait]
pub trait CartRepository {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<CartLineDto>>;

    /// Upsert: an existing (user, product) row has its quantity increased.
    async fn add(&self, cart_item: InsertCartItemEntity) -> Result<()>;

    async fn set_quantity(&self, user_id: i64, product_id: i64, quantity: i32) -> Result<bool>;

    async fn remove(&self, user_id: i64, product_id: i64) -> Result<bool>;
}
