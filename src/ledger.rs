//! Cumulative spend per payment method over one batch run.

use crate::decimal::Money;
use crate::registry::MethodRegistry;
use std::collections::HashMap;

/// Cumulative amount charged to each payment method.
///
/// # Invariants
///
/// - The key set equals the method IDs known at construction
/// - Every entry starts at zero and never decreases
#[derive(Debug, Clone, Default)]
pub struct SpendingLedger {
    spent: HashMap<String, Money>,
}

impl SpendingLedger {
    /// Creates a ledger with a zero entry for every registered method.
    pub fn for_registry(registry: &MethodRegistry) -> Self {
        SpendingLedger {
            spent: registry
                .iter()
                .map(|method| (method.id().to_string(), Money::ZERO))
                .collect(),
        }
    }

    /// Adds `amount` to the method's cumulative spend.
    ///
    /// Returns `false` for unknown IDs and negative amounts; neither mutates
    /// the ledger.
    pub(crate) fn record(&mut self, method_id: &str, amount: Money) -> bool {
        if amount.is_negative() {
            return false;
        }

        match self.spent.get_mut(method_id) {
            Some(total) => {
                *total += amount;
                true
            }
            None => false,
        }
    }

    /// Cumulative spend of a method.
    pub fn spent(&self, method_id: &str) -> Option<Money> {
        self.spent.get(method_id).copied()
    }

    /// Returns an owned copy of all entries.
    pub fn snapshot(&self) -> HashMap<String, Money> {
        self.spent.clone()
    }
}
