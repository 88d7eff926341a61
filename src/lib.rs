//! # Payment Optimizer
//!
//! Allocates payments for a batch of orders across loyalty points and
//! payment cards, each with a discount percentage and a spendable limit.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`, discounts rounded half-up
//! - **Fixed policy**: full points, best promotion, partial points, any card
//! - **Strict invariants**: limits never go negative, spend never decreases
//! - **Sequential processing**: orders are allocated in input order against shared limits
//!
//! ## Example
//!
//! ```
//! use payment_optimizer::{read_orders, read_payment_methods, PaymentOptimizer};
//! use std::io::Cursor;
//!
//! let methods = r#"[{"id": "PUNKTY", "discount": "15", "limit": "100.00"}]"#;
//! let orders = r#"[{"id": "ORDER1", "value": "100.00"}]"#;
//!
//! let mut optimizer =
//!     PaymentOptimizer::new(read_payment_methods(Cursor::new(methods)).unwrap()).unwrap();
//! let report = optimizer.optimize(&read_orders(Cursor::new(orders)).unwrap());
//! assert!(report.unpayable.is_empty());
//!
//! let mut output = Vec::new();
//! optimizer.write_report(&mut output).unwrap();
//! assert_eq!(String::from_utf8(output).unwrap(), "PUNKTY 85.00\n");
//! ```

pub mod allocation;
pub mod decimal;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod loader;
pub mod method;
pub mod order;
pub mod registry;

pub use allocation::{allocate, Allocation, Charge, Tier};
pub use decimal::Money;
pub use engine::{BatchReport, PaymentOptimizer};
pub use error::{EngineError, Result};
pub use ledger::SpendingLedger;
pub use loader::{read_orders, read_payment_methods};
pub use method::{MethodKind, PaymentMethod, PaymentMethodRecord, POINTS_METHOD_ID};
pub use order::{Order, OrderRecord};
pub use registry::MethodRegistry;
