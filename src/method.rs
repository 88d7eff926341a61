//! Payment method models for JSON parsing and internal representation.

use crate::decimal::{deserialize_decimal, Money};
use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Reserved ID of the loyalty-points payment method.
pub const POINTS_METHOD_ID: &str = "PUNKTY";

/// Raw payment method record as read from JSON.
///
/// `discount` and `limit` accept either strings or numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethodRecord {
    /// Method identifier
    #[serde(default)]
    pub id: String,

    /// Discount percentage granted when this method pays a whole order
    #[serde(deserialize_with = "deserialize_decimal")]
    pub discount: Decimal,

    /// Spendable limit
    pub limit: Money,
}

impl PaymentMethodRecord {
    /// Validates the raw record into a typed payment method.
    ///
    /// `index` is the record's position in the input, used for diagnostics.
    pub fn parse(&self, index: usize) -> Result<PaymentMethod> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(invalid(index, "payment method id is empty".to_string()));
        }
        if self.discount < Decimal::ZERO || self.discount > Decimal::ONE_HUNDRED {
            return Err(invalid(
                index,
                format!("discount {} for {} is outside 0..=100", self.discount, id),
            ));
        }
        if self.limit.is_negative() {
            return Err(invalid(
                index,
                format!("limit {} for {} is negative", self.limit, id),
            ));
        }

        Ok(PaymentMethod::new(id, self.discount, self.limit))
    }
}

fn invalid(index: usize, message: String) -> EngineError {
    EngineError::InvalidRecord { index, message }
}

/// Distinguishes the loyalty-points method from ordinary card methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Loyalty points; tried first and usable for partial payments.
    Points,

    /// Any other method (typically a bank card).
    Card,
}

impl MethodKind {
    /// Classifies a method by its ID.
    pub fn of(id: &str) -> Self {
        if id == POINTS_METHOD_ID {
            MethodKind::Points
        } else {
            MethodKind::Card
        }
    }
}

/// A validated payment method with its remaining limit.
///
/// # Invariants
///
/// - `limit` never goes negative
/// - `limit` never increases
#[derive(Debug, Clone)]
pub struct PaymentMethod {
    id: String,
    kind: MethodKind,
    discount: Decimal,
    limit: Money,
}

impl PaymentMethod {
    /// Creates a payment method. The kind is derived from the ID.
    pub fn new(id: impl Into<String>, discount: Decimal, limit: Money) -> Self {
        let id = id.into();
        PaymentMethod {
            kind: MethodKind::of(&id),
            id,
            discount,
            limit,
        }
    }

    /// Method identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Points or card.
    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    /// Returns `true` for the loyalty-points method.
    pub fn is_points(&self) -> bool {
        self.kind == MethodKind::Points
    }

    /// Discount percentage.
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Remaining spendable limit.
    pub fn limit(&self) -> Money {
        self.limit
    }

    /// Returns `true` if the remaining limit can absorb `amount`.
    ///
    /// Negative amounts are never coverable.
    pub fn covers(&self, amount: Money) -> bool {
        !amount.is_negative() && self.limit >= amount
    }

    /// Returns `(discount, to_pay)` for paying all of `value` with this method.
    pub fn price(&self, value: Money) -> (Money, Money) {
        let discount = value.percentage(self.discount);
        (discount, value - discount)
    }

    /// Deducts `amount` from the remaining limit.
    ///
    /// Returns `false` and leaves the limit untouched if the limit cannot
    /// cover the amount.
    pub(crate) fn charge(&mut self, amount: Money) -> bool {
        if !self.covers(amount) {
            return false;
        }

        self.limit -= amount;
        true
    }
}
