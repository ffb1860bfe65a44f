//! Property-based tests for the partitioning pipeline.

use std::collections::HashSet;

use proptest::prelude::*;

use cs_optimizer::{
    balanced_split, group_score, optimize, AffinityIndex, CandidatePoolBuilder, LocalSearch,
    IndexSplit,
};
use cs_types::{
    ExecutionMode, GroupPair, PartitionConfig, Person, PersonSet, PreferenceModel, PreferenceRecord,
};

/// Strategy: a person count and, per person, a ranked list of partner indices.
/// Indices past the person count become dangling references.
fn scenario_strategy() -> impl Strategy<Value = (usize, Vec<Vec<usize>>)> {
    (0usize..=9).prop_flat_map(|n| {
        let lists = prop::collection::vec(prop::collection::vec(0usize..n + 3, 0..=5), n);
        (Just(n), lists)
    })
}

fn name(i: usize) -> Person {
    Person::new(format!("p{i}"))
}

fn build(n: usize, lists: &[Vec<usize>]) -> (PersonSet, PreferenceModel) {
    let persons: PersonSet = (0..n).map(name).collect();
    let prefs = PreferenceModel::from_records(lists.iter().enumerate().map(|(i, list)| {
        PreferenceRecord::new(name(i), list.iter().copied().map(name).collect())
    }));
    (persons, prefs)
}

fn combined(pair: &GroupPair, prefs: &PreferenceModel) -> u64 {
    group_score(&pair.group1, prefs) + group_score(&pair.group2, prefs)
}

proptest! {
    // 1. Every returned pair partitions the person set and is balanced
    #[test]
    fn pool_pairs_are_balanced_partitions(
        (n, lists) in scenario_strategy(),
        seed in any::<u64>(),
        num_pairs in 1usize..=20,
    ) {
        let (persons, prefs) = build(n, &lists);
        let config = PartitionConfig::new()
            .with_seed(seed)
            .with_num_pairs(num_pairs)
            .with_top_n(num_pairs);
        let pool = CandidatePoolBuilder::new(config).build(&persons, &prefs).unwrap();

        prop_assert!(!pool.is_empty());
        let mut keys = HashSet::new();
        for pair in pool.pairs() {
            prop_assert!(pair.validate_against(&persons).is_ok());
            prop_assert_eq!(pair.score1, group_score(&pair.group1, &prefs));
            prop_assert_eq!(pair.score2, group_score(&pair.group2, &prefs));
            prop_assert!(keys.insert(pair.partition_key()));
        }
    }

    // 2. Local search never lowers the combined score and keeps sizes
    #[test]
    fn optimize_is_monotone(
        (n, lists) in scenario_strategy(),
        split_at in 0usize..=9,
    ) {
        let (persons, prefs) = build(n, &lists);
        let order: Vec<Person> = persons.iter().cloned().collect();
        let cut = split_at.min(order.len());
        let mut pair = GroupPair::new(order[..cut].to_vec(), order[cut..].to_vec());
        let before = combined(&pair, &prefs);
        let sizes = (pair.group1.len(), pair.group2.len());

        let stats = optimize(&mut pair, &prefs);

        prop_assert!(combined(&pair, &prefs) >= before);
        prop_assert_eq!(stats.initial_score, before);
        prop_assert_eq!(stats.final_score, pair.total_score());
        prop_assert_eq!((pair.group1.len(), pair.group2.len()), sizes);
    }

    // 3. A converged pair is a fixed point
    #[test]
    fn optimize_is_idempotent((n, lists) in scenario_strategy()) {
        let (persons, prefs) = build(n, &lists);
        let (g1, g2) = balanced_split(persons.iter().cloned());
        let mut pair = GroupPair::new(g1, g2);
        optimize(&mut pair, &prefs);

        let converged = pair.clone();
        let stats = optimize(&mut pair, &prefs);
        prop_assert_eq!(stats.swaps, 0);
        prop_assert_eq!(pair, converged);
    }

    // 4. Incremental swap deltas agree with rescoring both groups
    #[test]
    fn swap_delta_matches_full_rescoring(
        (n, lists) in scenario_strategy(),
        i in 0usize..5,
        j in 0usize..5,
    ) {
        prop_assume!(n >= 2);
        let (persons, prefs) = build(n, &lists);
        let index = AffinityIndex::build(persons.as_slice(), &prefs);
        let (g1, g2) = balanced_split(0..n);
        let (i, j) = (i % g1.len(), j % g2.len());

        let mut in_first = vec![false; n];
        for &m in &g1 {
            in_first[m] = true;
        }
        let score = |a: &[usize], b: &[usize]| {
            group_score(&index.persons_of(a), &prefs) + group_score(&index.persons_of(b), &prefs)
        };
        let before = score(&g1, &g2);
        let (mut n1, mut n2) = (g1.clone(), g2.clone());
        std::mem::swap(&mut n1[i], &mut n2[j]);
        let after = score(&n1, &n2);

        prop_assert_eq!(index.swap_delta(g1[i], g2[j], &in_first), after as i64 - before as i64);
    }

    // 5. Index-level search and scorer agree on the final score
    #[test]
    fn search_stats_match_scorer((n, lists) in scenario_strategy()) {
        let (persons, prefs) = build(n, &lists);
        let index = AffinityIndex::build(persons.as_slice(), &prefs);
        let (g1, g2) = balanced_split(0..n);
        let mut split = IndexSplit::new(g1, g2);
        let stats = LocalSearch::new(&index).run(&mut split);

        let final_score = group_score(&index.persons_of(&split.group1), &prefs)
            + group_score(&index.persons_of(&split.group2), &prefs);
        prop_assert_eq!(stats.final_score, final_score);
        prop_assert!(split.is_balanced());
    }

    // 6. Fixed seed gives identical pools, in either execution mode
    #[test]
    fn seeded_runs_are_reproducible(
        (n, lists) in scenario_strategy(),
        seed in any::<u64>(),
    ) {
        let (persons, prefs) = build(n, &lists);
        let config = PartitionConfig::new().with_seed(seed).with_num_pairs(15).with_top_n(15);

        let a = CandidatePoolBuilder::new(config.clone()).build(&persons, &prefs).unwrap();
        let b = CandidatePoolBuilder::new(config.clone()).build(&persons, &prefs).unwrap();
        let c = CandidatePoolBuilder::new(config.with_execution(ExecutionMode::Parallel))
            .build(&persons, &prefs)
            .unwrap();

        prop_assert_eq!(a.candidates(), b.candidates());
        prop_assert_eq!(a.candidates(), c.candidates());
    }
}

#[test]
fn two_couples_always_reach_the_optimum() {
    let (persons, prefs) = build(4, &[vec![1], vec![0], vec![3], vec![2]]);
    for seed in 0..25 {
        let pool = CandidatePoolBuilder::new(PartitionConfig::new().with_seed(seed))
            .build(&persons, &prefs)
            .unwrap();
        let best = pool.best().unwrap();
        assert_eq!(best.total_score(), 4);
        assert!(best.pair.same_partition(&GroupPair::new(
            vec![name(0), name(1)],
            vec![name(2), name(3)]
        )));
    }
}
