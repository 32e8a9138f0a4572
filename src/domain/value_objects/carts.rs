use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItemModel {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItemModel {
    pub quantity: i32,
}

/// Cart row joined with the product it references.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineDto {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub title: String,
    pub price: i64,
    pub thumbnail: Option<String>,
}
