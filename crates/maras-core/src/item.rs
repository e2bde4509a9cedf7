//! Drug and reaction items
//!
//! Items are the atoms of every rule and closed itemset. The mining library
//! hands them over as plain integer codes; [`ItemDomain`] owns the mapping
//! from those codes back to drugs and reactions.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Error type for item decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Negative item code: {code}")]
    Negative { code: i64 },
    #[error("Item code {code} outside domain (limit {limit})")]
    OutOfRange { code: i64, limit: u32 },
    #[error("Item domain of {drug_count} drugs and {reaction_count} reactions exceeds the i32 code range")]
    DomainTooLarge { drug_count: u32, reaction_count: u32 },
}

// =============================================================================
// Item
// =============================================================================

/// Whether an item names a drug or an adverse reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Drug,
    Reaction,
}

/// A drug or reaction identified by its integer code.
///
/// Equality, hashing and ordering only look at the code.
#[derive(Debug, Clone, Copy)]
pub struct Item {
    code: u32,
    kind: ItemKind,
}

impl Item {
    #[inline]
    pub const fn code(&self) -> u32 {
        self.code
    }

    #[inline]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    #[inline]
    pub const fn is_drug(&self) -> bool {
        matches!(self.kind, ItemKind::Drug)
    }

    #[inline]
    pub const fn is_reaction(&self) -> bool {
        matches!(self.kind, ItemKind::Reaction)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

// =============================================================================
// Item Domain
// =============================================================================

/// Largest number of codes a domain may span. Raw codes are `i32`, so the
/// last valid code is `i32::MAX`.
pub const MAX_DOMAIN_CODES: u32 = i32::MAX as u32 + 1;

/// Code layout shared with the mining library.
///
/// Codes `0..drug_count` are drugs, the following `reaction_count` codes are
/// reactions. Anything else is rejected with [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "DomainCounts")]
pub struct ItemDomain {
    drug_count: u32,
    reaction_count: u32,
}

/// Unchecked form of [`ItemDomain`] as it appears in configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
struct DomainCounts {
    drug_count: u32,
    reaction_count: u32,
}

impl TryFrom<DomainCounts> for ItemDomain {
    type Error = DecodeError;

    fn try_from(counts: DomainCounts) -> Result<Self, Self::Error> {
        Self::try_new(counts.drug_count, counts.reaction_count)
    }
}

impl ItemDomain {
    /// Create a domain from constant counts.
    ///
    /// # Panics
    /// Panics if the domain spans more than [`MAX_DOMAIN_CODES`] codes. Use
    /// [`ItemDomain::try_new`] for counts that come from outside.
    pub const fn new(drug_count: u32, reaction_count: u32) -> Self {
        match Self::checked(drug_count, reaction_count) {
            Some(domain) => domain,
            None => panic!("item domain exceeds the i32 code range"),
        }
    }

    pub fn try_new(drug_count: u32, reaction_count: u32) -> Result<Self, DecodeError> {
        Self::checked(drug_count, reaction_count).ok_or(DecodeError::DomainTooLarge {
            drug_count,
            reaction_count,
        })
    }

    const fn checked(drug_count: u32, reaction_count: u32) -> Option<Self> {
        match drug_count.checked_add(reaction_count) {
            Some(total) if total <= MAX_DOMAIN_CODES => Some(Self {
                drug_count,
                reaction_count,
            }),
            _ => None,
        }
    }

    #[inline]
    pub const fn drug_count(&self) -> u32 {
        self.drug_count
    }

    #[inline]
    pub const fn reaction_count(&self) -> u32 {
        self.reaction_count
    }

    /// One past the largest valid code.
    #[inline]
    pub const fn limit(&self) -> u32 {
        self.drug_count + self.reaction_count
    }

    /// Decode a raw item code.
    pub fn decode(&self, code: i32) -> Result<Item, DecodeError> {
        if code < 0 {
            return Err(DecodeError::Negative { code: code as i64 });
        }
        self.item(code as u32)
    }

    /// The `n`th drug of the domain.
    pub fn drug(&self, n: u32) -> Result<Item, DecodeError> {
        if n >= self.drug_count {
            return Err(DecodeError::OutOfRange {
                code: n as i64,
                limit: self.drug_count,
            });
        }
        self.item(n)
    }

    /// The `n`th reaction of the domain.
    pub fn reaction(&self, n: u32) -> Result<Item, DecodeError> {
        let out_of_range = DecodeError::OutOfRange {
            code: self.drug_count as i64 + n as i64,
            limit: self.limit(),
        };
        if n >= self.reaction_count {
            return Err(out_of_range);
        }
        match self.drug_count.checked_add(n) {
            Some(code) => self.item(code),
            None => Err(out_of_range),
        }
    }

    fn item(&self, code: u32) -> Result<Item, DecodeError> {
        let limit = self.limit();
        if code >= limit {
            return Err(DecodeError::OutOfRange {
                code: code as i64,
                limit,
            });
        }
        let kind = if code < self.drug_count {
            ItemKind::Drug
        } else {
            ItemKind::Reaction
        };
        Ok(Item { code, kind })
    }
}
