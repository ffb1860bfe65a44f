//! Initial balanced two-way split.

use cs_types::{GroupPair, Person};

/// Walk `order` once, appending each item to the first group while it is not
/// larger than the second, otherwise to the second. Ties go to the first
/// group, so sizes never differ by more than one.
pub fn balanced_split<T, I>(order: I) -> (Vec<T>, Vec<T>)
where
    I: IntoIterator<Item = T>,
{
    let iter = order.into_iter();
    let (lower, _) = iter.size_hint();
    let mut group1 = Vec::with_capacity(lower / 2 + 1);
    let mut group2 = Vec::with_capacity(lower / 2);

    for item in iter {
        if group1.len() <= group2.len() {
            group1.push(item);
        } else {
            group2.push(item);
        }
    }

    (group1, group2)
}

/// Unscored pair seeded from an already shuffled person order.
pub fn initial_pair(order: &[Person]) -> GroupPair {
    let (group1, group2) = balanced_split(order.iter().cloned());
    GroupPair::new(group1, group2)
}
