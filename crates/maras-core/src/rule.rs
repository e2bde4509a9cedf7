//! Mined association rules
//!
//! A [`Rule`] is the enriched form of a raw mined rule: decoded items on both
//! sides, the four statistics exactly as mined, and the cached union of all
//! items used for closure lookup.

use std::fmt;

use crate::interaction::Interaction;
use crate::item::Item;

// =============================================================================
// Statistics
// =============================================================================

/// Statistics attached to a mined rule. Never recomputed after mining.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RuleStats {
    /// Support of the antecedent
    pub coverage: f64,
    /// Number of transactions containing antecedent and consequent
    pub absolute_support: u64,
    pub confidence: f64,
    pub lift: f64,
}

// =============================================================================
// Raw Rules
// =============================================================================

/// A rule as produced by the mining library, before item decoding.
pub trait RawRule {
    fn antecedent_codes(&self) -> &[i32];
    fn consequent_codes(&self) -> &[i32];
    fn coverage(&self) -> f64;
    fn absolute_support(&self) -> u64;
    fn confidence(&self) -> f64;
    fn lift(&self) -> f64;

    fn stats(&self) -> RuleStats {
        RuleStats {
            coverage: self.coverage(),
            absolute_support: self.absolute_support(),
            confidence: self.confidence(),
            lift: self.lift(),
        }
    }
}

impl<T: RawRule + ?Sized> RawRule for &T {
    fn antecedent_codes(&self) -> &[i32] {
        (**self).antecedent_codes()
    }

    fn consequent_codes(&self) -> &[i32] {
        (**self).consequent_codes()
    }

    fn coverage(&self) -> f64 {
        (**self).coverage()
    }

    fn absolute_support(&self) -> u64 {
        (**self).absolute_support()
    }

    fn confidence(&self) -> f64 {
        (**self).confidence()
    }

    fn lift(&self) -> f64 {
        (**self).lift()
    }
}

/// Owned raw rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MinedRule {
    pub antecedent: Vec<i32>,
    pub consequent: Vec<i32>,
    pub stats: RuleStats,
}

impl MinedRule {
    pub fn new(antecedent: Vec<i32>, consequent: Vec<i32>, stats: RuleStats) -> Self {
        Self {
            antecedent,
            consequent,
            stats,
        }
    }
}

impl RawRule for MinedRule {
    fn antecedent_codes(&self) -> &[i32] {
        &self.antecedent
    }

    fn consequent_codes(&self) -> &[i32] {
        &self.consequent
    }

    fn coverage(&self) -> f64 {
        self.stats.coverage
    }

    fn absolute_support(&self) -> u64 {
        self.stats.absolute_support
    }

    fn confidence(&self) -> f64 {
        self.stats.confidence
    }

    fn lift(&self) -> f64 {
        self.stats.lift
    }
}

// =============================================================================
// Rule
// =============================================================================

/// Decoded rule: antecedent ==> consequent.
///
/// Antecedent and consequent are expected to be disjoint; this is the mining
/// library's guarantee and is not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedent: Vec<Item>,
    consequent: Vec<Item>,
    stats: RuleStats,
    interaction: Interaction,
}

impl Rule {
    pub fn new(antecedent: Vec<Item>, consequent: Vec<Item>, stats: RuleStats) -> Self {
        let interaction = antecedent.iter().chain(consequent.iter()).copied().collect();
        Self {
            antecedent,
            consequent,
            stats,
            interaction,
        }
    }

    pub fn antecedent(&self) -> &[Item] {
        &self.antecedent
    }

    pub fn consequent(&self) -> &[Item] {
        &self.consequent
    }

    pub fn stats(&self) -> &RuleStats {
        &self.stats
    }

    pub fn coverage(&self) -> f64 {
        self.stats.coverage
    }

    pub fn absolute_support(&self) -> u64 {
        self.stats.absolute_support
    }

    pub fn confidence(&self) -> f64 {
        self.stats.confidence
    }

    pub fn lift(&self) -> f64 {
        self.stats.lift
    }

    /// Union of antecedent and consequent items.
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Drugs only on the left, reactions only on the right.
    ///
    /// An empty side passes its check.
    pub fn is_drug_to_reaction(&self) -> bool {
        self.antecedent.iter().all(Item::is_drug) && !self.consequent.iter().any(Item::is_drug)
    }

    /// At least two items in the antecedent.
    pub fn has_multi_drug_antecedent(&self) -> bool {
        self.antecedent.len() >= 2
    }

    /// At most two antecedent items and at most one consequent item.
    pub fn is_simple(&self) -> bool {
        self.antecedent.len() <= 2 && self.consequent.len() <= 1
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Item]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(f, &self.antecedent)?;
        f.write_str(" ==> ")?;
        write_items(f, &self.consequent)?;
        write!(
            f,
            " #SUP: {} #CONF: {} #LIFT: {}",
            self.stats.absolute_support, self.stats.confidence, self.stats.lift
        )
    }
}
