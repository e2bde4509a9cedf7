//! Configurable filter chains
//!
//! A [`FilterPipeline`] lists the filters to run over a [`RuleSet`], in the
//! order the caller chose. Pipelines deserialize from configuration, e.g.
//! `{"steps": ["drug_reaction", "closures"]}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::closure::ClosureLattice;
use crate::rule_set::RuleSet;

/// One filter step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFilter {
    /// [`RuleSet::find_closures`]
    Closures,
    /// [`RuleSet::filter_rules`]
    DrugReaction,
    /// [`RuleSet::filter_no_singleton_rules`]
    NoSingletons,
    /// [`RuleSet::filter_no_complex_rules`]
    NoComplex,
}

impl RuleFilter {
    pub const ALL: [RuleFilter; 4] = [
        RuleFilter::Closures,
        RuleFilter::DrugReaction,
        RuleFilter::NoSingletons,
        RuleFilter::NoComplex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleFilter::Closures => "closures",
            RuleFilter::DrugReaction => "drug_reaction",
            RuleFilter::NoSingletons => "no_singletons",
            RuleFilter::NoComplex => "no_complex",
        }
    }

    pub fn apply(&self, rules: &RuleSet, closures: &ClosureLattice) -> RuleSet {
        match self {
            RuleFilter::Closures => rules.find_closures(closures),
            RuleFilter::DrugReaction => rules.filter_rules(),
            RuleFilter::NoSingletons => rules.filter_no_singleton_rules(),
            RuleFilter::NoComplex => rules.filter_no_complex_rules(),
        }
    }
}

impl FromStr for RuleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        RuleFilter::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| format!("Unknown filter: {}", s))
    }
}

impl fmt::Display for RuleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of filter steps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterPipeline {
    #[serde(default)]
    pub steps: Vec<RuleFilter>,
}

impl FilterPipeline {
    pub fn new(steps: Vec<RuleFilter>) -> Self {
        Self { steps }
    }

    pub fn then(mut self, step: RuleFilter) -> Self {
        self.steps.push(step);
        self
    }

    /// Run every step in order. The input collection is left untouched.
    pub fn apply(&self, rules: &RuleSet, closures: &ClosureLattice) -> RuleSet {
        let mut current = rules.clone();
        for step in &self.steps {
            let next = step.apply(&current, closures);
            log::debug!("pipeline step {}: {} -> {} rules", step, current.len(), next.len());
            current = next;
        }
        current
    }
}
