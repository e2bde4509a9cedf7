//! Named rule collections and the rule filters
//!
//! A [`RuleSet`] is an ordered, append-only list of shared rules. Every filter
//! reads its receiver and returns a fresh collection holding the surviving
//! rules in their original order. Rules are shared via `Arc`, never copied.

use std::fmt;
use std::sync::Arc;

use crate::closure::ClosureLattice;
use crate::item::{DecodeError, Item, ItemDomain};
use crate::rule::{RawRule, Rule};

pub const CLOSED_RULES: &str = "Closed Rules";
pub const FILTERED_RULES: &str = "Filtered Rules";
pub const NO_SINGLETON_RULES: &str = "Filtered Rules - No singletons";
/// Same label as the singleton filter; downstream reports match on it.
pub const NO_COMPLEX_RULES: &str = NO_SINGLETON_RULES;

/// Named, ordered collection of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    name: String,
    rules: Vec<Arc<Rule>>,
}

impl RuleSet {
    /// Create an empty collection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Decode raw mined rules into a collection, keeping their order.
    ///
    /// Fails on the first item code outside `domain`; no collection is
    /// returned in that case.
    pub fn adapt<I>(name: impl Into<String>, domain: &ItemDomain, raw_rules: I) -> Result<Self, DecodeError>
    where
        I: IntoIterator,
        I::Item: RawRule,
    {
        let mut rule_set = Self::new(name);
        for (index, raw) in raw_rules.into_iter().enumerate() {
            let rule = decode_rule(domain, &raw).map_err(|e| {
                log::warn!("{}: rule {} not adapted: {}", rule_set.name, index, e);
                e
            })?;
            rule_set.push(rule);
        }
        log::debug!("{}: adapted {} rules", rule_set.name, rule_set.len());
        Ok(rule_set)
    }

    /// Append a shared rule.
    pub fn add_rule(&mut self, rule: Arc<Rule>) {
        self.rules.push(rule);
    }

    /// Append an owned rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(Arc::new(rule));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Rule>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Short summary used in diagnostics, e.g. `Closed Rules (12 rules)`.
    pub fn summary(&self) -> String {
        format!("{} ({} rules)", self.name, self.rules.len())
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Keep rules whose interaction is a closed set of the same size.
    pub fn find_closures(&self, closures: &ClosureLattice) -> RuleSet {
        self.select(CLOSED_RULES, |rule| closures.is_closed(rule.interaction()))
    }

    /// Keep rules with only drugs in the antecedent and only reactions in
    /// the consequent.
    pub fn filter_rules(&self) -> RuleSet {
        self.select(FILTERED_RULES, Rule::is_drug_to_reaction)
    }

    /// Drop rules with fewer than two antecedent items.
    pub fn filter_no_singleton_rules(&self) -> RuleSet {
        self.select(NO_SINGLETON_RULES, Rule::has_multi_drug_antecedent)
    }

    /// Drop rules with more than two antecedent items or more than one
    /// consequent item.
    pub fn filter_no_complex_rules(&self) -> RuleSet {
        self.select(NO_COMPLEX_RULES, Rule::is_simple)
    }

    /// Copy of this collection ordered by descending confidence.
    ///
    /// Ties keep their current order.
    pub fn sorted_by_confidence(&self) -> RuleSet {
        let mut rules = self.rules.clone();
        rules.sort_by(|a, b| b.confidence().total_cmp(&a.confidence()));
        Self {
            name: self.name.clone(),
            rules,
        }
    }

    fn select(&self, name: &str, mut keep: impl FnMut(&Rule) -> bool) -> RuleSet {
        let mut selected = RuleSet::new(name);
        for rule in &self.rules {
            if keep(&**rule) {
                selected.add_rule(Arc::clone(rule));
            }
        }
        log::debug!(
            "{}: {} -> {} rules",
            name,
            self.rules.len(),
            selected.rules.len()
        );
        selected
    }
}

fn decode_rule(domain: &ItemDomain, raw: &impl RawRule) -> Result<Rule, DecodeError> {
    let antecedent = decode_items(domain, raw.antecedent_codes())?;
    let consequent = decode_items(domain, raw.consequent_codes())?;
    Ok(Rule::new(antecedent, consequent, raw.stats()))
}

fn decode_items(domain: &ItemDomain, codes: &[i32]) -> Result<Vec<Item>, DecodeError> {
    codes.iter().map(|&code| domain.decode(code)).collect()
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Arc<Rule>;
    type IntoIter = std::slice::Iter<'a, Arc<Rule>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " ------- {} -------", self.name)?;
        for (i, rule) in self.rules.iter().enumerate() {
            writeln!(f, "  rule {}:  {}", i, rule)?;
        }
        write!(f, " --------------------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Interaction;
    use crate::rule::{MinedRule, RuleStats};

    // Drugs are codes 0..=4, reactions 5..=9.
    const DOMAIN: ItemDomain = ItemDomain::new(5, 5);

    fn stats(support: u64) -> RuleStats {
        RuleStats {
            coverage: 0.1 + support as f64,
            absolute_support: support,
            confidence: 1.0 / (support as f64 + 3.0),
            lift: 1.0 + 1.0 / 3.0,
        }
    }

    fn mined(ante: &[i32], cons: &[i32], support: u64) -> MinedRule {
        MinedRule::new(ante.to_vec(), cons.to_vec(), stats(support))
    }

    fn rule_set(rules: &[(&[i32], &[i32])]) -> RuleSet {
        let raw: Vec<MinedRule> = rules
            .iter()
            .enumerate()
            .map(|(i, (a, c))| mined(a, c, i as u64))
            .collect();
        RuleSet::adapt("Rules", &DOMAIN, &raw).unwrap()
    }

    fn set(codes: &[i32]) -> Interaction {
        codes.iter().map(|&c| DOMAIN.decode(c).unwrap()).collect()
    }

    fn codes(items: &[Item]) -> Vec<u32> {
        items.iter().map(Item::code).collect()
    }

    fn supports(rules: &RuleSet) -> Vec<u64> {
        rules.iter().map(|r| r.absolute_support()).collect()
    }

    #[test]
    fn test_adapt_preserves_order_and_stats() {
        let raw = vec![mined(&[3, 1], &[8], 4), mined(&[0], &[5, 2], 9)];
        let rules = RuleSet::adapt("Mined", &DOMAIN, &raw).unwrap();

        assert_eq!(rules.name(), "Mined");
        assert_eq!(rules.len(), 2);
        for (rule, source) in rules.iter().zip(&raw) {
            assert_eq!(rule.coverage().to_bits(), source.stats.coverage.to_bits());
            assert_eq!(rule.confidence().to_bits(), source.stats.confidence.to_bits());
            assert_eq!(rule.lift().to_bits(), source.stats.lift.to_bits());
            assert_eq!(rule.absolute_support(), source.stats.absolute_support);
        }
        assert_eq!(codes(rules.rules()[0].antecedent()), vec![3, 1]);
        assert_eq!(codes(rules.rules()[1].consequent()), vec![5, 2]);
    }

    #[test]
    fn test_adapt_keeps_duplicates() {
        let raw = vec![mined(&[0, 1], &[5], 2), mined(&[0, 1], &[5], 2)];
        assert_eq!(RuleSet::adapt("Mined", &DOMAIN, raw).unwrap().len(), 2);
    }

    #[test]
    fn test_adapt_fails_on_bad_code() {
        let raw = vec![mined(&[0], &[5], 1), mined(&[1], &[5, 10], 1)];
        let err = RuleSet::adapt("Mined", &DOMAIN, &raw).unwrap_err();
        assert_eq!(err, DecodeError::OutOfRange { code: 10, limit: 10 });

        let raw = vec![mined(&[-3], &[5], 1)];
        assert_eq!(
            RuleSet::adapt("Mined", &DOMAIN, &raw).unwrap_err(),
            DecodeError::Negative { code: -3 }
        );
    }

    #[test]
    fn test_empty_collection() {
        let rules = RuleSet::new("Nothing");
        assert!(rules.is_empty());
        assert_eq!(rules.name(), "Nothing");
        assert!(rules.find_closures(&ClosureLattice::new()).is_empty());
        assert!(rules.filter_rules().is_empty());
        assert!(rules.filter_no_singleton_rules().is_empty());
        assert!(rules.filter_no_complex_rules().is_empty());
    }

    #[test]
    fn test_same_rule_in_many_collections() {
        let rules = rule_set(&[(&[0, 1], &[5])]);
        let shared = Arc::clone(&rules.rules()[0]);
        let mut a = RuleSet::new("A");
        let mut b = RuleSet::new("B");
        a.add_rule(Arc::clone(&shared));
        b.add_rule(Arc::clone(&shared));
        assert!(Arc::ptr_eq(&a.rules()[0], &b.rules()[0]));
    }

    #[test]
    fn test_find_closures() {
        let rules = rule_set(&[
            (&[0, 1], &[5]), // {0,1,5} closed
            (&[0], &[6]),    // {0,6} not closed at level 2
            (&[2, 3], &[7]), // {2,3,7} only a superset at level 4
            (&[4], &[]),     // {4} closed
        ]);
        let lattice = ClosureLattice::from_closures(vec![
            set(&[5, 1, 0]),
            set(&[0, 5]),
            set(&[2, 3, 7, 8]),
            set(&[4]),
        ]);

        let closed = rules.find_closures(&lattice);
        assert_eq!(closed.name(), "Closed Rules");
        assert_eq!(supports(&closed), vec![0, 3]);
        assert!(Arc::ptr_eq(&closed.rules()[0], &rules.rules()[0]));
    }

    #[test]
    fn test_find_closures_needs_level() {
        let rules = rule_set(&[(&[0, 1], &[5])]);
        let lattice = ClosureLattice::from_levels(vec![vec![], vec![], vec![set(&[0, 1])]]);
        assert!(rules.find_closures(&lattice).is_empty());
    }

    #[test]
    fn test_filter_rules() {
        let rules = rule_set(&[
            (&[0, 1], &[5]), // kept
            (&[0, 6], &[5]), // reaction on the left
            (&[0], &[1]),    // drug on the right
            (&[], &[7]),     // empty antecedent passes
            (&[2], &[]),     // empty consequent passes
        ]);
        let filtered = rules.filter_rules();
        assert_eq!(filtered.name(), "Filtered Rules");
        assert_eq!(supports(&filtered), vec![0, 3, 4]);
    }

    #[test]
    fn test_filter_rules_idempotent() {
        let rules = rule_set(&[(&[0, 1], &[5]), (&[0, 6], &[5]), (&[3], &[8, 9])]);
        let once = rules.filter_rules();
        let twice = once.filter_rules();
        assert_eq!(supports(&once), supports(&twice));
        for (a, b) in once.iter().zip(&twice) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_filter_no_singleton_rules() {
        let rules = rule_set(&[(&[0, 1], &[5]), (&[0], &[5]), (&[], &[5]), (&[0, 1, 2], &[5, 6])]);
        let filtered = rules.filter_no_singleton_rules();
        assert_eq!(filtered.name(), "Filtered Rules - No singletons");
        assert_eq!(supports(&filtered), vec![0, 3]);
    }

    #[test]
    fn test_filter_no_complex_rules() {
        let rules = rule_set(&[(&[0, 1], &[5]), (&[0, 1, 2], &[5]), (&[0], &[5, 6]), (&[], &[])]);
        let filtered = rules.filter_no_complex_rules();
        assert_eq!(filtered.name(), "Filtered Rules - No singletons");
        assert_eq!(supports(&filtered), vec![0, 3]);
    }

    #[test]
    fn test_filters_leave_input_untouched() {
        let rules = rule_set(&[(&[0, 1], &[5]), (&[0], &[6]), (&[0, 6], &[1, 2])]);
        let before: Vec<Arc<Rule>> = rules.rules().to_vec();

        let _ = rules.find_closures(&ClosureLattice::new());
        let _ = rules.filter_rules();
        let _ = rules.filter_no_singleton_rules();
        let _ = rules.filter_no_complex_rules();
        let _ = rules.sorted_by_confidence();

        assert_eq!(rules.name(), "Rules");
        assert_eq!(rules.len(), before.len());
        for (a, b) in rules.iter().zip(&before) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    fn with_confidence(support: u64, confidence: f64) -> MinedRule {
        MinedRule::new(
            vec![0],
            vec![5],
            RuleStats {
                confidence,
                ..stats(support)
            },
        )
    }

    #[test]
    fn test_sorted_by_confidence() {
        let raw = vec![
            with_confidence(0, 0.2),
            with_confidence(1, 0.5),
            with_confidence(2, 0.5),
            with_confidence(3, 0.9),
        ];
        let rules = RuleSet::adapt("Rules", &DOMAIN, &raw).unwrap();
        let sorted = rules.sorted_by_confidence();

        assert_eq!(sorted.name(), "Rules");
        assert_eq!(supports(&sorted), vec![3, 1, 2, 0]);
        // equal confidence keeps the input order
        assert!(Arc::ptr_eq(&sorted.rules()[1], &rules.rules()[1]));
        assert!(Arc::ptr_eq(&sorted.rules()[2], &rules.rules()[2]));
        // receiver is untouched
        assert_eq!(supports(&rules), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_display() {
        let rules = rule_set(&[(&[0, 1], &[5])]);
        let text = rules.to_string();
        assert!(text.starts_with(" ------- Rules -------"));
        assert!(text.contains("rule 0:  0 1 ==> 5 #SUP: 0"));
        assert_eq!(rules.summary(), "Rules (1 rules)");
    }
}
