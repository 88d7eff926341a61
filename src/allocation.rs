//! Per-order payment allocation policy.
//!
//! Each order is paid by the first tier that succeeds:
//!
//! 1. **Full points**: the points method covers the whole order and its own
//!    discount applies.
//! 2. **Promotion**: the best-discount promotional card named by the order
//!    covers the whole order.
//! 3. **Partial points**: points cover at least 10% of the order; a flat 10%
//!    discount applies and a card pays whatever the points don't.
//! 4. **Any card**: the first card in registration order covering the full
//!    value pays it, without discount.
//!
//! Every tier is planned against the current limits before anything is
//! mutated, so a tier that cannot complete leaves no trace.

use crate::decimal::Money;
use crate::ledger::SpendingLedger;
use crate::order::Order;
use crate::registry::MethodRegistry;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::fmt;

/// Minimum share of the order value, in percent, the points balance must
/// reach for a partial points payment. Compared unrounded.
const PARTIAL_POINTS_MIN_SHARE_PERCENT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Flat discount, in percent, for orders partially paid with points.
/// Independent of the points method's own discount rate.
const PARTIAL_POINTS_DISCOUNT_PERCENT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// The policy tier that paid an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Whole order paid with points at the points discount.
    FullPoints,

    /// Whole order paid with a promotional card at its discount.
    Promotion,

    /// Points plus a card, with the flat partial-points discount.
    PartialPoints,

    /// Whole order paid with any card, no discount.
    AnyCard,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::FullPoints => "full points",
            Tier::Promotion => "promotion",
            Tier::PartialPoints => "partial points",
            Tier::AnyCard => "any card",
        };
        f.write_str(name)
    }
}

/// An amount charged to one payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    pub method_id: String,
    pub amount: Money,
}

/// How one order was paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub order_id: String,
    pub tier: Tier,

    /// Discount granted on the order value.
    pub discount: Money,

    /// Charges in commit order; the points charge comes first when present.
    pub charges: Vec<Charge>,
}

impl Allocation {
    /// Sum of all charges, equal to the order value minus the discount.
    pub fn total_charged(&self) -> Money {
        self.charges
            .iter()
            .fold(Money::ZERO, |total, charge| total + charge.amount)
    }
}

/// A tier's decision, expressed as registry positions and amounts.
struct Plan {
    tier: Tier,
    discount: Money,
    charges: Vec<(usize, Money)>,
}

/// Allocates payment for one order, mutating limits and the ledger.
///
/// Returns `None` if no tier can pay the order; in that case neither the
/// registry nor the ledger is touched.
pub fn allocate(
    order: &Order,
    registry: &mut MethodRegistry,
    ledger: &mut SpendingLedger,
) -> Option<Allocation> {
    let plan = plan_full_points(order, registry)
        .or_else(|| plan_promotion(order, registry))
        .or_else(|| plan_partial_points(order, registry))
        .or_else(|| plan_any_card(order, registry))?;

    commit(order, plan, registry, ledger)
}

fn plan_full_points(order: &Order, registry: &MethodRegistry) -> Option<Plan> {
    let position = registry.points_position()?;
    let points = registry.at(position)?;
    if !order.value.is_positive() || !points.covers(order.value) {
        return None;
    }

    let (discount, to_pay) = points.price(order.value);
    Some(Plan {
        tier: Tier::FullPoints,
        discount,
        charges: vec![(position, to_pay)],
    })
}

fn plan_promotion(order: &Order, registry: &MethodRegistry) -> Option<Plan> {
    let position = best_promotion(order, registry)?;
    let method = registry.at(position)?;

    let (discount, to_pay) = method.price(order.value);
    Some(Plan {
        tier: Tier::Promotion,
        discount,
        charges: vec![(position, to_pay)],
    })
}

/// Highest-discount promotion able to cover the whole order.
///
/// Scans the order's promotions in their listed order and only replaces the
/// current best on a strictly higher discount, so ties go to the promotion
/// listed first. Unknown IDs are skipped.
fn best_promotion(order: &Order, registry: &MethodRegistry) -> Option<usize> {
    let mut best: Option<(usize, Decimal)> = None;

    for id in &order.promotions {
        let Some(position) = registry.position(id) else {
            continue;
        };
        let Some(method) = registry.at(position) else {
            continue;
        };
        if !method.covers(order.value) {
            continue;
        }

        match best {
            Some((_, best_discount)) if method.discount() <= best_discount => {}
            _ => best = Some((position, method.discount())),
        }
    }

    best.map(|(position, _)| position)
}

fn plan_partial_points(order: &Order, registry: &MethodRegistry) -> Option<Plan> {
    let position = registry.points_position()?;
    let points = registry.at(position)?;
    let value = order.value;
    if !value.is_positive() {
        return None;
    }

    let min_share = value.as_decimal() * PARTIAL_POINTS_MIN_SHARE_PERCENT / Decimal::ONE_HUNDRED;
    if points.limit().as_decimal() < min_share {
        return None;
    }

    let discount = value.percentage(PARTIAL_POINTS_DISCOUNT_PERCENT);
    let to_pay = value - discount;
    let points_used = points.limit().min(to_pay);
    let remaining = to_pay - points_used;

    // A card able to take the remainder must exist even when nothing is left,
    // but a zero remainder is not charged to it.
    let card = first_card_covering(registry, remaining)?;
    let mut charges = vec![(position, points_used)];
    if !remaining.is_zero() {
        charges.push((card, remaining));
    }

    Some(Plan {
        tier: Tier::PartialPoints,
        discount,
        charges,
    })
}

fn plan_any_card(order: &Order, registry: &MethodRegistry) -> Option<Plan> {
    let position = first_card_covering(registry, order.value)?;
    Some(Plan {
        tier: Tier::AnyCard,
        discount: Money::ZERO,
        charges: vec![(position, order.value)],
    })
}

/// First non-points method, in registration order, whose limit covers `amount`.
fn first_card_covering(registry: &MethodRegistry, amount: Money) -> Option<usize> {
    registry
        .iter()
        .position(|method| !method.is_points() && method.covers(amount))
}

/// Applies a plan in full, or not at all.
///
/// Every charge is checked against the current limits before any of them is
/// applied; a plan naming the same method twice or exceeding a limit is
/// rejected without mutation.
fn commit(
    order: &Order,
    plan: Plan,
    registry: &mut MethodRegistry,
    ledger: &mut SpendingLedger,
) -> Option<Allocation> {
    let mut charges = Vec::with_capacity(plan.charges.len());

    for (index, &(position, amount)) in plan.charges.iter().enumerate() {
        let method = registry.at(position)?;
        let repeated = plan.charges[..index].iter().any(|&(p, _)| p == position);
        if repeated || !method.covers(amount) {
            warn!(
                "Order {}: rejecting {} plan, charge of {} to {} does not fit",
                order.id,
                plan.tier,
                amount,
                method.id()
            );
            return None;
        }
        charges.push(Charge {
            method_id: method.id().to_string(),
            amount,
        });
    }

    for (&(position, amount), charge) in plan.charges.iter().zip(&charges) {
        registry.charge(position, amount);
        ledger.record(&charge.method_id, amount);
    }

    let allocation = Allocation {
        order_id: order.id.clone(),
        tier: plan.tier,
        discount: plan.discount,
        charges,
    };

    debug!(
        "Order {}: paid via {} (value {}, discount {}, charged {})",
        order.id,
        allocation.tier,
        order.value,
        allocation.discount,
        allocation.total_charged()
    );

    Some(allocation)
}
