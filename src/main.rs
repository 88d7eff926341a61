//! Payment Optimizer CLI
//!
//! Reads orders and payment methods from JSON files and prints the amount
//! spent with each payment method.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- orders.json paymentmethods.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use payment_optimizer::{read_orders, read_payment_methods, EngineError, PaymentOptimizer, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(EngineError::MissingArgument);
    }

    let orders_path = &args[1];
    let methods_path = &args[2];
    require_json_extension(orders_path)?;
    require_json_extension(methods_path)?;

    let orders = read_orders(BufReader::new(File::open(orders_path)?))?;
    let methods = read_payment_methods(BufReader::new(File::open(methods_path)?))?;

    let mut optimizer = PaymentOptimizer::new(methods)?;
    let report = optimizer.optimize(&orders);

    for order_id in &report.unpayable {
        eprintln!("Failed to pay for order: {}", order_id);
    }

    let stdout = io::stdout();
    let handle = stdout.lock();
    optimizer.write_report(handle)?;

    Ok(())
}

fn require_json_extension(path: &str) -> Result<()> {
    let is_json = Path::new(path)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        Ok(())
    } else {
        Err(EngineError::InvalidExtension {
            path: path.to_string(),
        })
    }
}
