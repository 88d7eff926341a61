//! Batch payment optimizer.
//!
//! Owns the method registry and the spending ledger for one run and
//! allocates orders strictly in the order they are supplied. Each allocation
//! sees the limits left by the previous ones, so the input order matters.

use crate::allocation::{allocate, Allocation};
use crate::decimal::Money;
use crate::error::Result;
use crate::ledger::SpendingLedger;
use crate::method::PaymentMethod;
use crate::order::Order;
use crate::registry::MethodRegistry;
use csv::{QuoteStyle, WriterBuilder};
use log::debug;
use std::collections::HashMap;
use std::io::Write;

/// Outcome of one [`PaymentOptimizer::optimize`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Successful allocations, in input order.
    pub allocations: Vec<Allocation>,

    /// IDs of orders no tier could pay, in input order.
    pub unpayable: Vec<String>,
}

/// The payment optimizer.
///
/// Not meant to be shared across concurrent batches; build a fresh one per
/// run from the full method list.
///
/// # Output Ordering
///
/// The report lists methods in registration order to keep output
/// deterministic.
#[derive(Debug, Clone)]
pub struct PaymentOptimizer {
    /// Payment methods and their remaining limits.
    registry: MethodRegistry,

    /// Cumulative spend per method.
    ledger: SpendingLedger,
}

impl PaymentOptimizer {
    /// Creates an optimizer from the full method list.
    ///
    /// Fails if two methods share an ID.
    pub fn new(methods: Vec<PaymentMethod>) -> Result<Self> {
        let registry = MethodRegistry::new(methods)?;
        let ledger = SpendingLedger::for_registry(&registry);

        if registry.points().is_none() {
            debug!("No points method registered, points tiers disabled");
        }

        Ok(PaymentOptimizer { registry, ledger })
    }

    /// Allocates every order once, in the given order.
    pub fn optimize(&mut self, orders: &[Order]) -> BatchReport {
        let mut report = BatchReport::default();

        for order in orders {
            match allocate(order, &mut self.registry, &mut self.ledger) {
                Some(allocation) => report.allocations.push(allocation),
                None => {
                    debug!("Order {}: no tier can pay it", order.id);
                    report.unpayable.push(order.id.clone());
                }
            }
        }

        debug!(
            "Allocated {} of {} orders",
            report.allocations.len(),
            orders.len()
        );

        report
    }

    /// Returns a copy of the cumulative spend per method.
    pub fn spendings(&self) -> HashMap<String, Money> {
        self.ledger.snapshot()
    }

    /// Read-only view of the methods and their remaining limits.
    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Writes `<method id> <amount>` for every method with positive spend.
    ///
    /// Lines follow registration order; amounts have exactly 2 decimal places.
    pub fn write_report<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_writer(writer);

        for method in self.registry.iter() {
            let spent = self.ledger.spent(method.id()).unwrap_or(Money::ZERO);
            if spent.is_positive() {
                csv_writer.write_record([method.id(), spent.to_string().as_str()])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}
