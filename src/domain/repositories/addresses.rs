use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::addresses::{AddressEntity, InsertAddressEntity};

#[automock]
#[async_trait]
pub trait AddressRepository {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<AddressEntity>>;

    /// Inserting or updating a default address clears the flag on the user's
    /// other addresses within the same transaction.
    async fn insert(&self, address: InsertAddressEntity) -> Result<i64>;

    async fn update(&self, address_id: i64, address: InsertAddressEntity) -> Result<bool>;

    async fn delete(&self, address_id: i64, user_id: i64) -> Result<bool>;
}
