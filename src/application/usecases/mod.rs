pub mod addresses;
pub mod carts;
pub mod checkout;
pub mod order_admin;
pub mod payment_info;
pub mod payment_tracking;
