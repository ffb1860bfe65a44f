//! Group and per-person satisfaction scores.
//!
//! The two functions use different weightings and are intentionally kept
//! independent: [`group_score`] is the optimization objective, while
//! [`person_in_group_score`] is only used for reporting.

use cs_types::{Person, PreferenceModel};
use std::collections::HashSet;

/// Sum over every member `p` and every partner `f` at rank `i` of `p`'s list
/// that is also a member: `len(list(p)) - i`.
///
/// Only the ranking side is credited: if `p` ranks `f` but `f` does not rank
/// `p`, just `p`'s term is counted.
pub fn group_score(group: &[Person], prefs: &PreferenceModel) -> u64 {
    let members: HashSet<&Person> = group.iter().collect();
    group
        .iter()
        .map(|person| {
            let partners = prefs.partners(person);
            let len = partners.len() as u64;
            partners
                .iter()
                .enumerate()
                .filter(|(_, partner)| members.contains(partner))
                .map(|(rank, _)| len - rank as u64)
                .sum::<u64>()
        })
        .sum()
}

/// Fixed bonus for a co-placed partner at the given 0-based rank.
pub fn rank_bonus(rank: usize) -> u32 {
    match rank {
        0 => 3,
        1 => 2,
        2 => 1,
        _ => 0,
    }
}

/// Display score of one person: [`rank_bonus`] summed over the partners of
/// `person` that appear in `group`.
pub fn person_in_group_score(person: &Person, group: &[Person], prefs: &PreferenceModel) -> u32 {
    let members: HashSet<&Person> = group.iter().collect();
    prefs
        .partners(person)
        .iter()
        .enumerate()
        .filter(|(_, partner)| members.contains(partner))
        .map(|(rank, _)| rank_bonus(rank))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_types::people;

    #[test]
    fn test_group_score_uses_list_length_weights() {
        // A ranks B, C, D: weights 3, 2, 1
        let prefs = PreferenceModel::new().with("A", &["B", "C", "D"]);
        assert_eq!(group_score(&people(["A", "B"]), &prefs), 3);
        assert_eq!(group_score(&people(["A", "C"]), &prefs), 2);
        assert_eq!(group_score(&people(["A", "D"]), &prefs), 1);
        assert_eq!(group_score(&people(["A", "B", "C", "D"]), &prefs), 6);
    }

    #[test]
    fn test_group_score_is_asymmetric() {
        // X ranks Y first, Y ranks nobody
        let prefs = PreferenceModel::new().with("X", &["Y", "Z"]);
        assert_eq!(group_score(&people(["X", "Y"]), &prefs), 2);

        let mutual = prefs.clone().with("Y", &["X"]);
        assert_eq!(group_score(&people(["X", "Y"]), &mutual), 3);
    }

    #[test]
    fn test_dangling_partners_are_inert() {
        let prefs = PreferenceModel::new().with("A", &["ghost", "B"]);
        // B is at rank 1 of a 2-long list
        assert_eq!(group_score(&people(["A", "B"]), &prefs), 1);
        assert_eq!(person_in_group_score(&"A".into(), &people(["A", "B"]), &prefs), 2);
    }

    #[test]
    fn test_empty_group_scores_zero() {
        let prefs = PreferenceModel::new().with("A", &["B"]);
        assert_eq!(group_score(&[], &prefs), 0);
    }

    #[test]
    fn test_person_score_bonus_table() {
        let prefs = PreferenceModel::new().with("A", &["B", "C", "D", "E"]);
        let everyone = people(["A", "B", "C", "D", "E"]);
        assert_eq!(person_in_group_score(&"A".into(), &everyone, &prefs), 6);
        assert_eq!(person_in_group_score(&"A".into(), &people(["A", "E"]), &prefs), 0);
        assert_eq!(person_in_group_score(&"A".into(), &people(["A", "C"]), &prefs), 2);
        assert_eq!(person_in_group_score(&"B".into(), &everyone, &prefs), 0);
    }

    #[test]
    fn test_person_score_is_not_a_group_score_decomposition() {
        let prefs = PreferenceModel::new()
            .with("A", &["B", "C", "D", "E", "F"])
            .with("B", &["A"]);
        let group = people(["A", "B", "F"]);
        let per_person: u32 = group
            .iter()
            .map(|p| person_in_group_score(p, &group, &prefs))
            .sum();
        // A: 5 (B) + 1 (F) = 6, B: 1 -> 7; display: A 3 + 0, B 3 -> 6
        assert_eq!(group_score(&group, &prefs), 7);
        assert_eq!(per_person, 6);
    }

    #[test]
    fn test_rank_bonus() {
        assert_eq!(
            (0..5).map(rank_bonus).collect::<Vec<_>>(),
            vec![3, 2, 1, 0, 0]
        );
    }
}
