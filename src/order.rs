//! Order models for JSON parsing and internal representation.

use crate::decimal::Money;
use crate::error::{EngineError, Result};
use serde::Deserialize;

/// Raw order record as read from JSON.
///
/// `promotions` may be absent or `null`; both mean "no promotions".
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    /// Order identifier
    #[serde(default)]
    pub id: String,

    /// Order value
    pub value: Money,

    /// IDs of promotional payment methods eligible for this order
    #[serde(default)]
    pub promotions: Option<Vec<String>>,
}

impl OrderRecord {
    /// Validates the raw record into a typed order.
    ///
    /// `index` is the record's position in the input, used for diagnostics.
    pub fn parse(&self, index: usize) -> Result<Order> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(EngineError::InvalidRecord {
                index,
                message: "order id is empty".to_string(),
            });
        }
        if !self.value.is_positive() {
            return Err(EngineError::InvalidRecord {
                index,
                message: format!("order {} has non-positive value {}", id, self.value),
            });
        }

        Ok(Order::new(
            id,
            self.value,
            self.promotions.clone().unwrap_or_default(),
        ))
    }
}

/// An order ready for allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Order identifier (not checked for uniqueness)
    pub id: String,

    /// Order value before any discount
    pub value: Money,

    /// Promotional method IDs, in the order's own preference order
    pub promotions: Vec<String>,
}

impl Order {
    /// Creates a new order.
    pub fn new(id: impl Into<String>, value: Money, promotions: Vec<String>) -> Self {
        Order {
            id: id.into(),
            value,
            promotions,
        }
    }
}
