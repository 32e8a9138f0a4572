use serde::Deserialize;
use thiserror::Error;

/// Raised inside the address transaction so that side effects (like clearing
/// sibling default flags) roll back when the target row is missing. Carried
/// through `anyhow::Error` and downcast at the repository boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressWriteDenied {
    #[error("address not found")]
    AddressNotFound,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddressModel {
    pub user_id: i64,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAddressModel {
    pub user_id: i64,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub is_default: bool,
}
