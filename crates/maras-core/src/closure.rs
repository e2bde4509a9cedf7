//! Closed itemset lattice
//!
//! Level `k` holds the closed interactions of size `k`. The lattice is built
//! by the itemset miner and only read here.

use crate::interaction::Interaction;

/// Size-indexed levels of closed interactions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClosureLattice {
    levels: Vec<Vec<Interaction>>,
}

impl ClosureLattice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap levels as computed by the miner. Level `i` is expected to hold
    /// interactions of size `i`.
    pub fn from_levels(levels: Vec<Vec<Interaction>>) -> Self {
        Self { levels }
    }

    /// Group closed interactions by size.
    ///
    /// Every level up to the largest size is created, so level 0 always
    /// exists once anything has been added.
    pub fn from_closures(closures: impl IntoIterator<Item = Interaction>) -> Self {
        let mut levels: Vec<Vec<Interaction>> = Vec::new();
        for closure in closures {
            let size = closure.size();
            if levels.len() <= size {
                levels.resize_with(size + 1, Vec::new);
            }
            levels[size].push(closure);
        }
        Self { levels }
    }

    /// Number of levels, including empty ones.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Level `size`, or `None` past the highest computed level.
    pub fn level(&self, size: usize) -> Option<&[Interaction]> {
        self.levels.get(size).map(Vec::as_slice)
    }

    pub fn levels(&self) -> &[Vec<Interaction>] {
        &self.levels
    }

    /// Total number of closed interactions across all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `interaction` is covered by a closed set of its own size.
    ///
    /// A missing level always fails, even if a larger level would contain a
    /// superset. Within the level the scan stops at the first closed set
    /// containing every item of `interaction`.
    pub fn is_closed(&self, interaction: &Interaction) -> bool {
        match self.level(interaction.size()) {
            Some(level) => level.iter().any(|closed| closed.contains_all(interaction)),
            None => false,
        }
    }
}
