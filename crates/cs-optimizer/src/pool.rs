//! Randomized restarts, deduplication and ranking of optimized pairs.

use std::collections::HashSet;

use cs_types::{
    CsResult, ExecutionMode, GroupPair, PartitionConfig, PartitionKey, PersonSet, PreferenceModel,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::affinity::AffinityIndex;
use crate::local_search::{IndexSplit, LocalSearch, SearchStats};
use crate::partition::balanced_split;
use crate::scoring::group_score;

/// An optimized pair tagged with the restart that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub restart: usize,
    pub pair: GroupPair,
}

impl Candidate {
    pub fn total_score(&self) -> u64 {
        self.pair.total_score()
    }
}

/// Aggregate counters of a pool build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Restarts actually executed (sequential) or evaluated (parallel).
    pub restarts: usize,
    /// Restarts whose result was already in the pool.
    pub duplicates: usize,
    /// Distinct partitions found before truncation to the top N.
    pub unique: usize,
    pub total_swaps: usize,
    pub total_passes: usize,
}

/// Distinct candidates, ranked by combined score once built.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    keys: HashSet<PartitionKey>,
    seed: u64,
    stats: PoolStats,
}

impl CandidatePool {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Add `candidate` unless a pool entry already holds the same partition
    /// (under either labelling). Returns whether it was added.
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if !self.keys.insert(candidate.pair.partition_key()) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    pub fn contains(&self, pair: &GroupPair) -> bool {
        self.keys.contains(&pair.partition_key())
    }

    /// Sort by combined score, highest first; equal scores keep restart order.
    pub fn rank(&mut self) {
        self.candidates
            .sort_by(|a, b| b.total_score().cmp(&a.total_score()).then(a.restart.cmp(&b.restart)));
    }

    /// Rank and keep only the first `top_n` entries.
    pub fn truncate_to(&mut self, top_n: usize) {
        self.rank();
        for dropped in self.candidates.drain(top_n.min(self.candidates.len())..) {
            self.keys.remove(&dropped.pair.partition_key());
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn pairs(&self) -> impl Iterator<Item = &GroupPair> {
        self.candidates.iter().map(|c| &c.pair)
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Seed the restart permutations were drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Result of one restart before deduplication.
#[derive(Debug, Clone)]
struct RestartOutcome {
    candidate: Candidate,
    search: SearchStats,
}

/// Drives `num_pairs` restarts of shuffle → balanced split → local search,
/// keeps the distinct results and returns the best `top_n`.
///
/// Restart `r` shuffles with a ChaCha8 stream keyed by `(seed, r)`, so a run
/// with a fixed seed is reproducible and does not depend on the execution
/// mode.
#[derive(Debug, Clone)]
pub struct CandidatePoolBuilder {
    config: PartitionConfig,
}

impl CandidatePoolBuilder {
    pub fn new(config: PartitionConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, persons: &PersonSet, prefs: &PreferenceModel) -> CsResult<CandidatePool> {
        self.config.validate()?;

        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let num_pairs = self.config.num_pairs;
        info!(
            "Building candidate pool: {} persons, {} restarts, top {}, seed {}, {:?}",
            persons.len(),
            num_pairs,
            self.config.top_n,
            seed,
            self.config.execution
        );

        let index = AffinityIndex::build(persons.as_slice(), prefs);
        let mut pool = CandidatePool::new(seed);

        match self.config.execution {
            ExecutionMode::Sequential => {
                for restart in 0..num_pairs {
                    if pool.len() >= num_pairs {
                        break;
                    }
                    let outcome = run_restart(&index, prefs, seed, restart);
                    record(&mut pool, outcome);
                }
            }
            ExecutionMode::Parallel => {
                let outcomes: Vec<RestartOutcome> = (0..num_pairs)
                    .into_par_iter()
                    .map(|restart| run_restart(&index, prefs, seed, restart))
                    .collect();
                for outcome in outcomes {
                    if pool.len() >= num_pairs {
                        break;
                    }
                    record(&mut pool, outcome);
                }
            }
        }

        pool.stats.unique = pool.len();
        pool.truncate_to(self.config.top_n);

        info!(
            "Candidate pool ready: {} distinct of {} restarts ({} duplicates), best score {}",
            pool.stats.unique,
            pool.stats.restarts,
            pool.stats.duplicates,
            pool.best().map(Candidate::total_score).unwrap_or_default()
        );
        Ok(pool)
    }
}

fn record(pool: &mut CandidatePool, outcome: RestartOutcome) {
    pool.stats.restarts += 1;
    pool.stats.total_swaps += outcome.search.swaps;
    pool.stats.total_passes += outcome.search.passes;

    let restart = outcome.candidate.restart;
    let score = outcome.candidate.total_score();
    if pool.insert(outcome.candidate) {
        debug!("Restart {}: new partition with score {}", restart, score);
    } else {
        pool.stats.duplicates += 1;
        debug!("Restart {}: duplicate partition with score {}", restart, score);
    }
}

fn run_restart(
    index: &AffinityIndex,
    prefs: &PreferenceModel,
    seed: u64,
    restart: usize,
) -> RestartOutcome {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(restart as u64);

    let mut order: Vec<usize> = (0..index.len()).collect();
    order.shuffle(&mut rng);

    let (group1, group2) = balanced_split(order);
    let mut split = IndexSplit::new(group1, group2);
    let search = LocalSearch::new(index).run(&mut split);

    let group1 = index.persons_of(&split.group1);
    let group2 = index.persons_of(&split.group2);
    let score1 = group_score(&group1, prefs);
    let score2 = group_score(&group2, prefs);
    debug_assert_eq!(score1 + score2, search.final_score);

    RestartOutcome {
        candidate: Candidate {
            restart,
            pair: GroupPair::new(group1, group2).with_scores(score1, score2),
        },
        search,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_types::people;

    fn person_set(ids: &[&str]) -> PersonSet {
        people(ids.iter().copied()).into_iter().collect()
    }

    fn two_couples() -> PreferenceModel {
        PreferenceModel::new()
            .with("A", &["B"])
            .with("B", &["A"])
            .with("C", &["D"])
            .with("D", &["C"])
    }

    #[test]
    fn test_two_couples_top_candidate() {
        let persons = person_set(&["A", "B", "C", "D"]);
        let pool = CandidatePoolBuilder::new(PartitionConfig::new().with_seed(11))
            .build(&persons, &two_couples())
            .unwrap();

        let best = pool.best().unwrap();
        assert_eq!(best.pair.score1, 2);
        assert_eq!(best.pair.score2, 2);
        assert_eq!(best.total_score(), 4);
        assert!(best.pair.same_partition(&GroupPair::new(
            people(["A", "B"]),
            people(["C", "D"])
        )));
    }

    #[test]
    fn test_pool_is_distinct_and_ranked() {
        let persons = person_set(&["A", "B", "C", "D", "E", "F", "G"]);
        let prefs = PreferenceModel::new()
            .with("A", &["B", "C"])
            .with("C", &["A"])
            .with("E", &["F", "G", "A"])
            .with("G", &["D"]);
        let pool = CandidatePoolBuilder::new(PartitionConfig::new().with_seed(3).with_top_n(50))
            .build(&persons, &prefs)
            .unwrap();

        let keys: HashSet<_> = pool.pairs().map(GroupPair::partition_key).collect();
        assert_eq!(keys.len(), pool.len());
        for window in pool.candidates().windows(2) {
            assert!(window[0].total_score() >= window[1].total_score());
            if window[0].total_score() == window[1].total_score() {
                assert!(window[0].restart < window[1].restart);
            }
        }
        for pair in pool.pairs() {
            pair.validate_against(&persons).unwrap();
        }
        let stats = pool.stats();
        assert_eq!(stats.restarts, 100);
        assert_eq!(stats.unique + stats.duplicates, stats.restarts);
    }

    #[test]
    fn test_no_preferences_gives_two_one_split() {
        let persons = person_set(&["A", "B", "C"]);
        let pool = CandidatePoolBuilder::new(PartitionConfig::new().with_seed(5))
            .build(&persons, &PreferenceModel::new())
            .unwrap();

        assert!(!pool.is_empty());
        assert!(pool.len() <= 3);
        for candidate in pool.candidates() {
            assert_eq!(candidate.total_score(), 0);
            let mut sizes = [candidate.pair.group1.len(), candidate.pair.group2.len()];
            sizes.sort_unstable();
            assert_eq!(sizes, [1, 2]);
        }
    }

    #[test]
    fn test_empty_person_set() {
        let pool = CandidatePoolBuilder::new(PartitionConfig::new().with_seed(1))
            .build(&PersonSet::default(), &PreferenceModel::new())
            .unwrap();

        assert_eq!(pool.len(), 1);
        let best = pool.best().unwrap();
        assert!(best.pair.group1.is_empty() && best.pair.group2.is_empty());
        assert_eq!(best.total_score(), 0);
        assert_eq!(pool.stats().duplicates, 99);
    }

    #[test]
    fn test_label_swapped_duplicate_is_rejected() {
        let mut pool = CandidatePool::new(0);
        let first = GroupPair::new(people(["A", "B"]), people(["C"]));
        let swapped = GroupPair::new(people(["C"]), people(["A", "B"]));
        assert!(pool.insert(Candidate { restart: 0, pair: first }));
        assert!(pool.contains(&swapped));
        assert!(!pool.insert(Candidate { restart: 1, pair: swapped }));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.candidates()[0].restart, 0);
    }

    #[test]
    fn test_truncate_keeps_stable_order() {
        let mut pool = CandidatePool::new(0);
        let entries = [
            (people(["A"]), people(["B", "C"]), 1),
            (people(["B"]), people(["A", "C"]), 5),
            (people(["C"]), people(["A", "B"]), 1),
        ];
        for (restart, (g1, g2, score)) in entries.into_iter().enumerate() {
            pool.insert(Candidate {
                restart,
                pair: GroupPair::new(g1, g2).with_scores(score, 0),
            });
        }
        pool.truncate_to(2);
        let order: Vec<usize> = pool.candidates().iter().map(|c| c.restart).collect();
        assert_eq!(order, vec![1, 0]);
        assert!(!pool.contains(&GroupPair::new(people(["C"]), people(["A", "B"]))));
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let persons = person_set(&["A", "B", "C", "D", "E", "F"]);
        let prefs = PreferenceModel::new()
            .with("A", &["D", "E"])
            .with("B", &["F"])
            .with("D", &["B", "A"]);
        let config = PartitionConfig::new().with_seed(99).with_num_pairs(40).with_top_n(10);

        let first = CandidatePoolBuilder::new(config.clone()).build(&persons, &prefs).unwrap();
        let second = CandidatePoolBuilder::new(config).build(&persons, &prefs).unwrap();
        assert_eq!(first.candidates(), second.candidates());
        assert_eq!(first.seed(), 99);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let persons = person_set(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let prefs = PreferenceModel::new()
            .with("A", &["B", "H"])
            .with("C", &["D", "A", "E"])
            .with("F", &["G"])
            .with("H", &["C"]);
        let config = PartitionConfig::new().with_seed(2024).with_top_n(20);

        let sequential = CandidatePoolBuilder::new(config.clone()).build(&persons, &prefs).unwrap();
        let parallel = CandidatePoolBuilder::new(config.with_execution(ExecutionMode::Parallel))
            .build(&persons, &prefs)
            .unwrap();
        assert_eq!(sequential.candidates(), parallel.candidates());
        assert_eq!(sequential.stats(), parallel.stats());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = CandidatePoolBuilder::new(PartitionConfig::new().with_top_n(0))
            .build(&person_set(&["A"]), &PreferenceModel::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_unseeded_run_reports_its_seed() {
        let persons = person_set(&["A", "B", "C", "D"]);
        let prefs = two_couples();
        let pool = CandidatePoolBuilder::new(PartitionConfig::new().with_num_pairs(10))
            .build(&persons, &prefs)
            .unwrap();
        let replay = CandidatePoolBuilder::new(
            PartitionConfig::new().with_num_pairs(10).with_seed(pool.seed()),
        )
        .build(&persons, &prefs)
        .unwrap();
        assert_eq!(pool.candidates(), replay.candidates());
    }
}
