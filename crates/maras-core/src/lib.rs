//! MARAS Core Library
//!
//! Post-processing for association rules mined from adverse event reports.
//! Rules relate drug combinations to adverse reactions; this crate decides
//! which of them describe closed interaction sets and which have the shape
//! pharmacovigilance reports care about.
//!
//! # Architecture
//!
//! Mining and closed itemset computation happen upstream. This crate adapts
//! the mined rules into a [`RuleSet`], then runs filters over it. Each filter
//! reads a collection and returns a new one; rules are shared, never copied
//! or mutated, so filters can run concurrently over the same input.
//!
//! # Modules
//!
//! - `item`: Drug/reaction items and code decoding
//! - `interaction`: Unordered item sets
//! - `rule`: Decoded rules and the raw rule adapter trait
//! - `closure`: Size-indexed lattice of closed interactions
//! - `rule_set`: Named rule collections and the filters
//! - `pipeline`: Configurable filter chains

pub mod closure;
pub mod interaction;
pub mod item;
pub mod pipeline;
pub mod rule;
pub mod rule_set;

// Re-export commonly used types
pub use closure::ClosureLattice;
pub use interaction::Interaction;
pub use item::{DecodeError, Item, ItemDomain, ItemKind};
pub use pipeline::{FilterPipeline, RuleFilter};
pub use rule::{MinedRule, RawRule, Rule, RuleStats};
pub use rule_set::RuleSet;
