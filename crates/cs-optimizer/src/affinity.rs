//! Dense pairwise weights used for incremental swap evaluation.

use cs_types::{Person, PreferenceModel};
use std::collections::HashMap;

/// Preference weights between the persons of one run, addressed by position.
///
/// `w(u, v)` is the sum of the group-score weights of `v` in `u`'s list.
/// Each neighbour entry stores the combined `c(u, v) = w(u, v) + w(v, u)`;
/// self-references are kept apart because they never change with a swap.
#[derive(Debug, Clone)]
pub struct AffinityIndex {
    persons: Vec<Person>,
    neighbours: Vec<Vec<(usize, u64)>>,
    self_weight: Vec<u64>,
}

impl AffinityIndex {
    /// `persons` must be duplicate-free; partners outside it are ignored.
    pub fn build(persons: &[Person], prefs: &PreferenceModel) -> Self {
        let n = persons.len();
        let position: HashMap<&Person, usize> =
            persons.iter().enumerate().map(|(i, p)| (p, i)).collect();

        let mut combined: Vec<HashMap<usize, u64>> = vec![HashMap::new(); n];
        let mut self_weight = vec![0u64; n];

        for (u, person) in persons.iter().enumerate() {
            let partners = prefs.partners(person);
            let len = partners.len() as u64;
            for (rank, partner) in partners.iter().enumerate() {
                let Some(&v) = position.get(partner) else {
                    continue;
                };
                let weight = len - rank as u64;
                if u == v {
                    self_weight[u] += weight;
                } else {
                    *combined[u].entry(v).or_default() += weight;
                    *combined[v].entry(u).or_default() += weight;
                }
            }
        }

        let neighbours = combined
            .into_iter()
            .map(|edges| {
                let mut edges: Vec<(usize, u64)> = edges.into_iter().collect();
                edges.sort_unstable();
                edges
            })
            .collect();

        Self {
            persons: persons.to_vec(),
            neighbours,
            self_weight,
        }
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn persons_of(&self, indices: &[usize]) -> Vec<Person> {
        indices.iter().map(|&i| self.persons[i].clone()).collect()
    }

    /// Combined weight `c(u, v)`.
    pub fn weight(&self, u: usize, v: usize) -> u64 {
        let edges = &self.neighbours[u];
        edges
            .binary_search_by_key(&v, |&(to, _)| to)
            .map(|pos| edges[pos].1)
            .unwrap_or(0)
    }

    /// Combined weight from `u` to the members of group 1 and of group 2,
    /// with `in_first[v]` telling which group `v` belongs to.
    pub fn split_affinity(&self, u: usize, in_first: &[bool]) -> (u64, u64) {
        self.neighbours[u]
            .iter()
            .fold((0, 0), |(first, second), &(v, w)| {
                if in_first[v] {
                    (first + w, second)
                } else {
                    (first, second + w)
                }
            })
    }

    /// Change of `score1 + score2` when `a` (group 1) and `b` (group 2) trade places.
    pub fn swap_delta(&self, a: usize, b: usize, in_first: &[bool]) -> i64 {
        let (a_first, a_second) = self.split_affinity(a, in_first);
        let (b_first, b_second) = self.split_affinity(b, in_first);
        // a_second and b_first both count the a-b edge, which stays split
        let cross = 2 * self.weight(a, b) as i64;
        (a_second as i64 - a_first as i64) + (b_first as i64 - b_second as i64) - cross
    }

    /// Group score of `members`, equal to `scoring::group_score` on the same persons.
    pub fn group_score(&self, members: &[usize]) -> u64 {
        let mut inside = vec![false; self.len()];
        for &m in members {
            inside[m] = true;
        }
        let mut pairs = 0u64;
        let mut own = 0u64;
        for &u in members {
            own += self.self_weight[u];
            pairs += self.neighbours[u]
                .iter()
                .filter(|(v, _)| inside[*v])
                .map(|(_, w)| w)
                .sum::<u64>();
        }
        // every unordered pair was visited from both ends
        own + pairs / 2
    }
}
