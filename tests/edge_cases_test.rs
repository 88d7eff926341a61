//! Scenario and property tests for the payment optimizer library.
//!
//! Covers order sensitivity, determinism, and limit/ledger conservation.

use payment_optimizer::{
    read_orders, read_payment_methods, BatchReport, Money, Order, PaymentMethod,
    PaymentOptimizer, Tier, POINTS_METHOD_ID,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Cursor;
use std::str::FromStr;

const SAMPLE_METHODS: &str = r#"[
    {"id": "PUNKTY", "discount": "15", "limit": "100.00"},
    {"id": "mZysk", "discount": "10", "limit": "180.00"},
    {"id": "BosBankrut", "discount": "5", "limit": "200.00"}
]"#;

const SAMPLE_ORDERS: &str = r#"[
    {"id": "ORDER1", "value": "100.00", "promotions": ["mZysk"]},
    {"id": "ORDER2", "value": "200.00", "promotions": ["BosBankrut"]},
    {"id": "ORDER3", "value": "150.00", "promotions": ["mZysk", "BosBankrut"]},
    {"id": "ORDER4", "value": "50.00"}
]"#;

fn money(s: &str) -> Money {
    Money::from_str(s).unwrap()
}

fn method(id: &str, discount: i64, limit: &str) -> PaymentMethod {
    PaymentMethod::new(id, Decimal::from(discount), money(limit))
}

fn order(id: &str, value: &str) -> Order {
    Order::new(id, money(value), Vec::new())
}

fn sample_methods() -> Vec<PaymentMethod> {
    read_payment_methods(Cursor::new(SAMPLE_METHODS)).unwrap()
}

fn sample_orders() -> Vec<Order> {
    read_orders(Cursor::new(SAMPLE_ORDERS)).unwrap()
}

fn run(methods: Vec<PaymentMethod>, orders: &[Order]) -> (PaymentOptimizer, BatchReport) {
    let mut optimizer = PaymentOptimizer::new(methods).unwrap();
    let report = optimizer.optimize(orders);
    (optimizer, report)
}

fn tiers_by_order(report: &BatchReport) -> Vec<(String, Tier)> {
    report
        .allocations
        .iter()
        .map(|a| (a.order_id.clone(), a.tier))
        .collect()
}

// ==================== CANONICAL SCENARIO ====================

#[test]
fn test_sample_scenario_exact_outcomes() {
    let (optimizer, report) = run(sample_methods(), &sample_orders());

    assert!(report.unpayable.is_empty());
    assert_eq!(
        tiers_by_order(&report),
        [
            ("ORDER1".to_string(), Tier::FullPoints),
            ("ORDER2".to_string(), Tier::Promotion),
            ("ORDER3".to_string(), Tier::Promotion),
            ("ORDER4".to_string(), Tier::PartialPoints),
        ]
    );

    let charged: Vec<Money> = report.allocations.iter().map(|a| a.total_charged()).collect();
    assert_eq!(
        charged,
        [money("85.00"), money("190.00"), money("135.00"), money("45.00")]
    );

    let expected: HashMap<String, Money> = [
        (POINTS_METHOD_ID.to_string(), money("100.00")),
        ("mZysk".to_string(), money("165.00")),
        ("BosBankrut".to_string(), money("190.00")),
    ]
    .into_iter()
    .collect();
    assert_eq!(optimizer.spendings(), expected);
}

#[test]
fn test_charged_equals_value_minus_discount() {
    let orders = sample_orders();
    let (_, report) = run(sample_methods(), &orders);

    for (allocation, order) in report.allocations.iter().zip(&orders) {
        assert_eq!(allocation.order_id, order.id);
        assert_eq!(
            allocation.total_charged() + allocation.discount,
            order.value,
            "order {}",
            order.id
        );
    }
}

// ==================== ORDER SENSITIVITY ====================

#[test]
fn test_permuted_batch_changes_outcome() {
    let mut orders = sample_orders();
    // ORDER4 first: it now takes points in full and ORDER3 falls back to partial points
    orders.rotate_right(1);

    let (optimizer, report) = run(sample_methods(), &orders);

    assert_eq!(
        tiers_by_order(&report),
        [
            ("ORDER4".to_string(), Tier::FullPoints),
            ("ORDER1".to_string(), Tier::Promotion),
            ("ORDER2".to_string(), Tier::Promotion),
            ("ORDER3".to_string(), Tier::PartialPoints),
        ]
    );

    let spendings = optimizer.spendings();
    assert_eq!(spendings[POINTS_METHOD_ID], money("100.00"));
    assert_eq!(spendings["mZysk"], money("167.50"));
    assert_eq!(spendings["BosBankrut"], money("190.00"));
}

#[test]
fn test_permuted_batch_changes_which_order_fails() {
    let methods = || vec![method("card", 0, "100.00")];

    let (_, forward) = run(methods(), &[order("A", "80.00"), order("B", "60.00")]);
    assert_eq!(forward.unpayable, ["B"]);

    let (_, backward) = run(methods(), &[order("B", "60.00"), order("A", "80.00")]);
    assert_eq!(backward.unpayable, ["A"]);
}

// ==================== DETERMINISM ====================

#[test]
fn test_rerun_from_same_state_is_deterministic() {
    let orders = vec![
        order("A", "80.00"),
        order("B", "60.00"),
        order("C", "15.00"),
        order("D", "500.00"),
    ];
    let methods = || {
        vec![
            method(POINTS_METHOD_ID, 15, "20.00"),
            method("card", 5, "100.00"),
        ]
    };

    let (first_optimizer, first) = run(methods(), &orders);
    let (second_optimizer, second) = run(methods(), &orders);

    assert_eq!(first, second);
    assert_eq!(first_optimizer.spendings(), second_optimizer.spendings());
}

// ==================== CONSERVATION ====================

#[test]
fn test_remaining_limit_equals_initial_minus_spent() {
    let initial = sample_methods();
    let initial_limits: Vec<(String, Money)> = initial
        .iter()
        .map(|m| (m.id().to_string(), m.limit()))
        .collect();

    let mut orders = sample_orders();
    orders.push(order("ORDER5", "12.34"));
    orders.push(order("ORDER6", "999.99"));
    let (optimizer, _) = run(initial, &orders);

    let spendings = optimizer.spendings();
    for (id, limit) in initial_limits {
        let remaining = optimizer.registry().remaining_limit(&id).unwrap();
        assert!(!remaining.is_negative(), "{} went negative", id);
        assert_eq!(remaining, limit - spendings[&id], "method {}", id);
    }
}

#[test]
fn test_ledger_keys_fixed_at_construction() {
    let orders = vec![Order::new(
        "ORDER1",
        money("10.00"),
        vec!["ghost".to_string()],
    )];
    let (optimizer, _) = run(sample_methods(), &orders);

    let mut keys: Vec<String> = optimizer.spendings().into_keys().collect();
    keys.sort();
    assert_eq!(keys, ["BosBankrut", "PUNKTY", "mZysk"]);
}

// ==================== PARTIAL POINTS ATOMICITY ====================

#[test]
fn test_failed_partial_points_leaves_points_for_later_orders() {
    // FIRST qualifies for partial points but no card can take its remainder;
    // the untouched points must then pay SECOND in full.
    let methods = vec![
        method(POINTS_METHOD_ID, 10, "40.00"),
        method("card", 0, "10.00"),
    ];
    let orders = vec![order("FIRST", "200.00"), order("SECOND", "40.00")];

    let (optimizer, report) = run(methods, &orders);

    assert_eq!(report.unpayable, ["FIRST"]);
    assert_eq!(
        tiers_by_order(&report),
        [("SECOND".to_string(), Tier::FullPoints)]
    );
    assert_eq!(optimizer.spendings()[POINTS_METHOD_ID], money("36.00"));
    assert_eq!(optimizer.spendings()["card"], Money::ZERO);
}

// ==================== BOUNDARIES ====================

#[test]
fn test_partial_points_boundary_is_inclusive() {
    let methods = vec![
        method(POINTS_METHOD_ID, 15, "12.50"),
        method("card", 0, "1000.00"),
    ];

    // 10% of 125.00 is exactly 12.50
    let (optimizer, report) = run(methods, &[order("EDGE", "125.00")]);

    assert_eq!(
        tiers_by_order(&report),
        [("EDGE".to_string(), Tier::PartialPoints)]
    );
    // 125.00 - 12.50 discount = 112.50: 12.50 from points, 100.00 by card
    assert_eq!(optimizer.spendings()[POINTS_METHOD_ID], money("12.50"));
    assert_eq!(optimizer.spendings()["card"], money("100.00"));
}

#[test]
fn test_partial_points_just_below_boundary() {
    let methods = vec![
        method(POINTS_METHOD_ID, 15, "12.49"),
        method("card", 0, "1000.00"),
    ];

    let (optimizer, report) = run(methods, &[order("EDGE", "125.00")]);

    assert_eq!(
        tiers_by_order(&report),
        [("EDGE".to_string(), Tier::AnyCard)]
    );
    assert_eq!(optimizer.spendings()[POINTS_METHOD_ID], Money::ZERO);
    assert_eq!(optimizer.spendings()["card"], money("125.00"));
}

#[test]
fn test_full_points_boundary_is_inclusive() {
    let (optimizer, report) = run(
        vec![method(POINTS_METHOD_ID, 0, "42.42")],
        &[order("EXACT", "42.42")],
    );

    assert!(report.unpayable.is_empty());
    assert_eq!(optimizer.spendings()[POINTS_METHOD_ID], money("42.42"));
    assert_eq!(
        optimizer.registry().remaining_limit(POINTS_METHOD_ID),
        Some(Money::ZERO)
    );
}

#[test]
fn test_full_discount_charges_zero() {
    let (optimizer, report) = run(
        vec![method(POINTS_METHOD_ID, 100, "10.00")],
        &[order("FREE", "10.00")],
    );

    assert_eq!(report.allocations[0].discount, money("10.00"));
    assert_eq!(optimizer.spendings()[POINTS_METHOD_ID], Money::ZERO);
    assert_eq!(
        optimizer.registry().remaining_limit(POINTS_METHOD_ID),
        Some(money("10.00"))
    );
}

#[test]
fn test_no_methods_everything_unpayable() {
    let (optimizer, report) = run(Vec::new(), &sample_orders());

    assert_eq!(report.unpayable, ["ORDER1", "ORDER2", "ORDER3", "ORDER4"]);
    assert!(optimizer.spendings().is_empty());
}
