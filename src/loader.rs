//! JSON input loading for orders and payment methods.
//!
//! A document may hold an array of records or a single record. Records that
//! fail to deserialize or validate are logged at warn level and skipped;
//! only a document that is not valid JSON at all is an error.

use crate::error::Result;
use crate::method::{PaymentMethod, PaymentMethodRecord};
use crate::order::{Order, OrderRecord};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Read;

/// Reads and validates orders, preserving document order.
pub fn read_orders<R: Read>(reader: R) -> Result<Vec<Order>> {
    let mut orders = Vec::new();

    for (index, record) in read_records::<_, OrderRecord>(reader, "order")? {
        match record.parse(index) {
            Ok(order) => orders.push(order),
            Err(e) => warn!("Skipping order: {}", e),
        }
    }

    Ok(orders)
}

/// Reads and validates payment methods, preserving document order.
pub fn read_payment_methods<R: Read>(reader: R) -> Result<Vec<PaymentMethod>> {
    let mut methods = Vec::new();

    for (index, record) in read_records::<_, PaymentMethodRecord>(reader, "payment method")? {
        match record.parse(index) {
            Ok(method) => methods.push(method),
            Err(e) => warn!("Skipping payment method: {}", e),
        }
    }

    Ok(methods)
}

/// Deserializes each element of the document, pairing it with its index.
fn read_records<R: Read, T: DeserializeOwned>(reader: R, kind: &str) -> Result<Vec<(usize, T)>> {
    let document: Value = serde_json::from_reader(reader)?;
    let items = match document {
        Value::Array(items) => items,
        single => vec![single],
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push((index, record)),
            Err(e) => warn!("Skipping {} at index {}: {}", kind, index, e),
        }
    }

    Ok(records)
}
