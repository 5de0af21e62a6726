use serde::{Deserialize, Serialize};

use posq_core::ValueObject;

/// Line item: product code and quantity.
///
/// Immutable once built; an [`Order`](crate::Order) owns its purchases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Purchase {
    product_id: String,
    quantity: u32,
}

impl Purchase {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl ValueObject for Purchase {}
