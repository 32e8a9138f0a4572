pub mod addresses;
pub mod cart_items;
pub mod order_items;
pub mod orders;
pub mod payment_records;
pub mod products;
