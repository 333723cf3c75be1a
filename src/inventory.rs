use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// In-memory inventory state: item name mapped to quantity.
///
/// Names are case-sensitive and stored verbatim as keys. A present entry
/// always has quantity >= 1; setting a quantity to 0 removes the entry.
/// The map is ordered by name, so the display list is stable and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Build an inventory from a stored mapping.
    ///
    /// Zero quantities never belong in storage; if a blob carries one
    /// anyway, the entry is dropped rather than shown as an impossible row.
    pub fn from_map(items: BTreeMap<String, u32>) -> Self {
        Self {
            items: items.into_iter().filter(|(_, q)| *q > 0).collect(),
        }
    }

    /// The current mapping, for persisting or inspection
    pub fn as_map(&self) -> &BTreeMap<String, u32> {
        &self.items
    }

    /// Quantity for `name`; 0 when the item is absent
    pub fn quantity(&self, name: &str) -> u32 {
        self.items.get(name).copied().unwrap_or(0)
    }

    /// Whether `name` is currently stocked
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Set the quantity for `name`. A quantity of 0 removes the entry.
    pub fn set_quantity(&mut self, name: &str, quantity: u32) {
        if quantity == 0 {
            self.items.remove(name);
        } else {
            self.items.insert(name.to_string(), quantity);
        }
    }

    /// Ordered (name, quantity) pairs
    pub fn items(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, q)| (name.as_str(), *q))
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items are stocked
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Presentation form of an item name: first letter uppercased, the rest
/// verbatim ("banana" -> "Banana"). The stored key is never changed.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
