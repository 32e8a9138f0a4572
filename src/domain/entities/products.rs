use diesel::prelude::*;

use crate::infrastructure::postgres::schema::products;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = products)]
pub struct ProductEntity {
    pub id: i64,
    pub title: String,
    pub price: i64,
    pub stock: i32,
    pub thumbnail: Option<String>,
}
