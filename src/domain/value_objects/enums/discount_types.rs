use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscountType {
    #[default]
    FixedAmount,
    Percentage,
}

impl DiscountType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "fixed_amount" => Some(DiscountType::FixedAmount),
            "percentage" => Some(DiscountType::Percentage),
            _ => None,
        }
    }
}

impl Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let discount_type = match self {
            DiscountType::FixedAmount => "fixed_amount",
            DiscountType::Percentage => "percentage",
        };
        write!(f, "{}", discount_type)
    }
}
