//! Interactions (item sets)

use std::collections::BTreeSet;
use std::fmt;

use crate::item::Item;

/// An unordered set of unique items, e.g. a drug pair plus a reaction.
///
/// Backed by a `BTreeSet` so iteration and display follow code order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Interaction {
    items: BTreeSet<Item>,
}

impl Interaction {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Number of distinct items.
    #[inline]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    /// True if every item of `other` is also in `self`.
    pub fn contains_all(&self, other: &Interaction) -> bool {
        self.items.is_superset(&other.items)
    }
}

impl FromIterator<Item> for Interaction {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for item in &self.items {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", item)?;
            first = false;
        }
        Ok(())
    }
}
