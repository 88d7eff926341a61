//! Registry of payment methods and their remaining limits.

use crate::decimal::Money;
use crate::error::{EngineError, Result};
use crate::method::PaymentMethod;
use std::collections::HashMap;

/// Payment methods indexed by ID, kept in registration order.
///
/// Registration order is the scan order of the fallback tier, so it is
/// preserved exactly as supplied to [`MethodRegistry::new`].
#[derive(Debug, Clone)]
pub struct MethodRegistry {
    /// Methods in registration order.
    methods: Vec<PaymentMethod>,

    /// Position of each method in `methods`, by ID.
    index: HashMap<String, usize>,

    /// Position of the points method, if one was registered.
    points: Option<usize>,
}

impl MethodRegistry {
    /// Builds a registry from the full method list.
    ///
    /// Fails if two methods share an ID.
    pub fn new(methods: Vec<PaymentMethod>) -> Result<Self> {
        let mut index = HashMap::with_capacity(methods.len());
        let mut points = None;

        for (position, method) in methods.iter().enumerate() {
            if index.insert(method.id().to_string(), position).is_some() {
                return Err(EngineError::DuplicateMethodId {
                    id: method.id().to_string(),
                });
            }
            if method.is_points() {
                points = Some(position);
            }
        }

        Ok(MethodRegistry {
            methods,
            index,
            points,
        })
    }

    /// Looks up a method by ID.
    pub fn get(&self, id: &str) -> Option<&PaymentMethod> {
        self.position(id).map(|position| &self.methods[position])
    }

    /// Registration position of a method.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Method at a registration position.
    pub fn at(&self, position: usize) -> Option<&PaymentMethod> {
        self.methods.get(position)
    }

    /// Registration position of the points method.
    pub fn points_position(&self) -> Option<usize> {
        self.points
    }

    /// The points method, if registered.
    pub fn points(&self) -> Option<&PaymentMethod> {
        self.points.map(|position| &self.methods[position])
    }

    /// Iterates methods in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.methods.iter()
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if no methods are registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Remaining limit of a method.
    pub fn remaining_limit(&self, id: &str) -> Option<Money> {
        self.get(id).map(PaymentMethod::limit)
    }

    /// Deducts `amount` from the method at `position`.
    ///
    /// Returns `false` without mutating anything if the position is unknown
    /// or the limit cannot cover the amount.
    pub(crate) fn charge(&mut self, position: usize, amount: Money) -> bool {
        self.methods
            .get_mut(position)
            .map(|method| method.charge(amount))
            .unwrap_or(false)
    }
}
