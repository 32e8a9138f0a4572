pub mod discount_types;
pub mod order_statuses;
pub mod payment_methods;
pub mod payment_record_statuses;
pub mod payment_statuses;
