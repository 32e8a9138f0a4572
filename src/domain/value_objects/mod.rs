pub mod addresses;
pub mod carts;
pub mod enums;
pub mod orders;
pub mod payments;
