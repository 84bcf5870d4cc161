//! 0/1 knapsack instance.

use crate::error::{AcoError, AcoResult};

/// A candidate item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Caller-assigned identifier, carried through untouched.
    pub id: usize,
    /// Value gained by packing the item.
    pub value: f64,
    /// Capacity consumed by packing the item.
    pub weight: f64,
}

impl Item {
    /// Creates an item.
    pub fn new(id: usize, value: f64, weight: f64) -> Self {
        Self { id, value, weight }
    }
}

/// Immutable knapsack instance: items plus a capacity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackInstance {
    items: Vec<Item>,
    capacity: f64,
}

impl KnapsackInstance {
    /// Builds an instance.
    ///
    /// # Errors
    /// - [`AcoError::EmptyInstance`] for no items
    /// - [`AcoError::InvalidInstance`] for a negative or non-finite capacity,
    ///   a non-positive or non-finite weight, or a negative or non-finite value
    pub fn new(items: Vec<Item>, capacity: f64) -> AcoResult<Self> {
        if items.is_empty() {
            return Err(AcoError::EmptyInstance { what: "items" });
        }
        if !(capacity >= 0.0 && capacity.is_finite()) {
            return Err(AcoError::invalid_instance(format!(
                "capacity must be finite and >= 0, got {capacity}"
            )));
        }
        for (i, item) in items.iter().enumerate() {
            if !(item.weight > 0.0 && item.weight.is_finite()) {
                return Err(AcoError::invalid_instance(format!(
                    "item {i} (id {}) has weight {}, expected finite and > 0",
                    item.id, item.weight
                )));
            }
            if !(item.value >= 0.0 && item.value.is_finite()) {
                return Err(AcoError::invalid_instance(format!(
                    "item {i} (id {}) has value {}, expected finite and >= 0",
                    item.id, item.value
                )));
            }
        }
        Ok(Self { items, capacity })
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; construction rejects empty instances.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items, in input order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Knapsack capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Total weight of a selection vector.
    pub fn total_weight(&self, selection: &[bool]) -> f64 {
        self.selected(selection).map(|item| item.weight).sum()
    }

    /// Total value of a selection vector.
    pub fn total_value(&self, selection: &[bool]) -> f64 {
        self.selected(selection).map(|item| item.value).sum()
    }

    /// Whether a selection vector fits the capacity.
    pub fn is_feasible(&self, selection: &[bool]) -> bool {
        selection.len() == self.items.len() && self.total_weight(selection) <= self.capacity
    }

    fn selected<'a>(&'a self, selection: &'a [bool]) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .zip(selection)
            .filter_map(|(item, &chosen)| chosen.then_some(item))
    }
}
