//! First-improvement swap search between the two groups.

use cs_types::{GroupPair, PreferenceModel};
use serde::{Deserialize, Serialize};

use crate::affinity::AffinityIndex;
use crate::scoring::group_score;

/// A two-way split over positions of an [`AffinityIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSplit {
    pub group1: Vec<usize>,
    pub group2: Vec<usize>,
}

impl IndexSplit {
    pub fn new(group1: Vec<usize>, group2: Vec<usize>) -> Self {
        Self { group1, group2 }
    }

    pub fn is_balanced(&self) -> bool {
        self.group1.len().abs_diff(self.group2.len()) <= 1
    }
}

/// Counters of one local search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Full scans over all position pairs, including the final one that
    /// found nothing.
    pub passes: usize,
    /// Committed swaps.
    pub swaps: usize,
    pub initial_score: u64,
    pub final_score: u64,
}

/// Swap-based hill climber.
///
/// Each pass visits every `(i, j)` with `i` over group 1 and `j` over group 2
/// positions and commits the swap of `group1[i]` and `group2[j]` as soon as
/// it strictly raises `score1 + score2`; scanning then continues on the
/// mutated groups. The search stops after a pass without any commit.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch<'a> {
    index: &'a AffinityIndex,
}

impl<'a> LocalSearch<'a> {
    pub fn new(index: &'a AffinityIndex) -> Self {
        Self { index }
    }

    pub fn run(&self, split: &mut IndexSplit) -> SearchStats {
        let mut in_first = vec![false; self.index.len()];
        for &member in &split.group1 {
            in_first[member] = true;
        }

        let initial_score =
            self.index.group_score(&split.group1) + self.index.group_score(&split.group2);
        let mut stats = SearchStats {
            initial_score,
            final_score: initial_score,
            ..SearchStats::default()
        };

        // A one-for-one swap keeps both sizes, so a balanced split stays
        // balanced and an unbalanced one is never touched.
        let swap_keeps_balance = split.is_balanced();

        loop {
            stats.passes += 1;
            let mut improved = false;

            for i in 0..split.group1.len() {
                for j in 0..split.group2.len() {
                    if !swap_keeps_balance {
                        continue;
                    }
                    let a = split.group1[i];
                    let b = split.group2[j];
                    let delta = self.index.swap_delta(a, b, &in_first);
                    if delta > 0 {
                        split.group1[i] = b;
                        split.group2[j] = a;
                        in_first[a] = false;
                        in_first[b] = true;
                        stats.final_score = (stats.final_score as i64 + delta) as u64;
                        stats.swaps += 1;
                        improved = true;
                    }
                }
            }

            if !improved {
                break;
            }
        }

        stats
    }
}

/// Optimize a person-level pair in place and rescore it.
///
/// The pair must not place anyone twice. Member order is preserved except at
/// swapped positions.
pub fn optimize(pair: &mut GroupPair, prefs: &PreferenceModel) -> SearchStats {
    let persons: Vec<_> = pair.group1.iter().chain(&pair.group2).cloned().collect();
    let index = AffinityIndex::build(&persons, prefs);

    let n1 = pair.group1.len();
    let mut split = IndexSplit::new((0..n1).collect(), (n1..persons.len()).collect());
    let stats = LocalSearch::new(&index).run(&mut split);

    pair.group1 = index.persons_of(&split.group1);
    pair.group2 = index.persons_of(&split.group2);
    pair.score1 = group_score(&pair.group1, prefs);
    pair.score2 = group_score(&pair.group2, prefs);
    stats
}
