//! # cs-optimizer
//!
//! Preference-driven two-way partitioning for ClassSplit.
//!
//! Provides the group and per-person scorers, the balanced initial split, a
//! first-improvement swap search with incremental score deltas, and the
//! candidate pool builder that runs many randomized restarts and keeps the
//! best distinct partitions.

mod affinity;
mod local_search;
mod partition;
mod pool;
mod report;
mod scoring;

pub use affinity::AffinityIndex;
pub use local_search::{optimize, IndexSplit, LocalSearch, SearchStats};
pub use partition::{balanced_split, initial_pair};
pub use pool::{Candidate, CandidatePool, CandidatePoolBuilder, PoolStats};
pub use report::{GroupReport, MemberReport, PairReport, PartitionReport, RunId};
pub use scoring::{group_score, person_in_group_score, rank_bonus};
