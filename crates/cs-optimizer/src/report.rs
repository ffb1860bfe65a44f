//! Display-ready view of a ranked candidate pool.

use chrono::{DateTime, Utc};
use cs_types::{GroupPair, PartitionConfig, Person, PreferenceModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pool::{CandidatePool, PoolStats};
use crate::scoring::person_in_group_score;

/// Unique partitioning run identifier.
pub type RunId = Uuid;

/// One member with their display score inside their group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberReport {
    pub person: Person,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub size: usize,
    /// Group score (optimization objective).
    pub score: u64,
    pub members: Vec<MemberReport>,
}

impl GroupReport {
    fn new(group: &[Person], score: u64, prefs: &PreferenceModel) -> Self {
        let members = group
            .iter()
            .map(|person| MemberReport {
                person: person.clone(),
                score: person_in_group_score(person, group, prefs),
            })
            .collect();
        Self {
            size: group.len(),
            score,
            members,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairReport {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub restart: usize,
    pub total_score: u64,
    pub group1: GroupReport,
    pub group2: GroupReport,
}

impl PairReport {
    pub fn new(rank: usize, restart: usize, pair: &GroupPair, prefs: &PreferenceModel) -> Self {
        Self {
            rank,
            restart,
            total_score: pair.total_score(),
            group1: GroupReport::new(&pair.group1, pair.score1, prefs),
            group2: GroupReport::new(&pair.group2, pair.score2, prefs),
        }
    }
}

/// Result of a partitioning run as handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionReport {
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub num_pairs: usize,
    pub top_n: usize,
    pub persons: usize,
    pub stats: PoolStats,
    pub pairs: Vec<PairReport>,
}

impl PartitionReport {
    pub fn new(
        pool: &CandidatePool,
        prefs: &PreferenceModel,
        config: &PartitionConfig,
        persons: usize,
    ) -> Self {
        let pairs = pool
            .candidates()
            .iter()
            .enumerate()
            .map(|(i, c)| PairReport::new(i + 1, c.restart, &c.pair, prefs))
            .collect();
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            seed: pool.seed(),
            num_pairs: config.num_pairs,
            top_n: config.top_n,
            persons,
            stats: *pool.stats(),
            pairs,
        }
    }

    pub fn best(&self) -> Option<&PairReport> {
        self.pairs.first()
    }
}
