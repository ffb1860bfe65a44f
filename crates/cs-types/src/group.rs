use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{CsResult, PartitionError};
use crate::person::Person;
use crate::roster::PersonSet;

/// Two groups that together partition the person set, with their scores.
///
/// Member order carries no meaning for scoring; it is kept stable for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPair {
    pub group1: Vec<Person>,
    pub group2: Vec<Person>,
    pub score1: u64,
    pub score2: u64,
}

impl GroupPair {
    /// Unscored pair; scores are filled in by the optimizer.
    pub fn new(group1: Vec<Person>, group2: Vec<Person>) -> Self {
        Self {
            group1,
            group2,
            score1: 0,
            score2: 0,
        }
    }

    pub fn with_scores(mut self, score1: u64, score2: u64) -> Self {
        self.score1 = score1;
        self.score2 = score2;
        self
    }

    /// Combined score `score1 + score2`.
    pub fn total_score(&self) -> u64 {
        self.score1 + self.score2
    }

    pub fn is_balanced(&self) -> bool {
        self.group1.len().abs_diff(self.group2.len()) <= 1
    }

    /// Label-independent form of this partition.
    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(&self.group1, &self.group2)
    }

    /// True when both pairs split the persons the same way, regardless of
    /// which side is called group 1.
    pub fn same_partition(&self, other: &GroupPair) -> bool {
        self.partition_key() == other.partition_key()
    }

    /// Check the balance and partition invariants against `persons`.
    pub fn validate_against(&self, persons: &PersonSet) -> CsResult<()> {
        if !self.is_balanced() {
            return Err(PartitionError::Unbalanced {
                size1: self.group1.len(),
                size2: self.group2.len(),
            }
            .into());
        }

        let mut seen: HashSet<&Person> = HashSet::with_capacity(persons.len());
        for person in self.group1.iter().chain(self.group2.iter()) {
            if !seen.insert(person) {
                return Err(PartitionError::NotAPartition {
                    message: format!("{} is placed more than once", person),
                }
                .into());
            }
            if !persons.contains(person) {
                return Err(PartitionError::NotAPartition {
                    message: format!("{} is not in the person set", person),
                }
                .into());
            }
        }
        if seen.len() != persons.len() {
            return Err(PartitionError::NotAPartition {
                message: format!("{} of {} persons placed", seen.len(), persons.len()),
            }
            .into());
        }
        Ok(())
    }
}

/// Canonical form of a two-way partition: both sides sorted, the smaller side
/// (by lexicographic order) first. Equal keys mean equal partitions up to
/// swapping the group labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionKey {
    first: Vec<Person>,
    second: Vec<Person>,
}

impl PartitionKey {
    pub fn new(group1: &[Person], group2: &[Person]) -> Self {
        let mut a = group1.to_vec();
        let mut b = group2.to_vec();
        a.sort();
        b.sort();
        if b < a {
            std::mem::swap(&mut a, &mut b);
        }
        Self { first: a, second: b }
    }
}
