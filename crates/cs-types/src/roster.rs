use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::person::Person;

/// A roster row: the person id (first column) plus the remaining cells,
/// which are kept only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    pub person: Person,
    pub cells: Vec<String>,
}

/// A roster table with its header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub header: Vec<String>,
    pub rows: Vec<RosterRow>,
}

impl Roster {
    pub fn new(header: Vec<String>, rows: Vec<RosterRow>) -> Self {
        Self { header, rows }
    }

    /// Roster with bare ids and a single "name" column.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = ids
            .into_iter()
            .map(|id| RosterRow {
                person: Person::new(id),
                cells: Vec::new(),
            })
            .collect();
        Self {
            header: vec!["name".to_string()],
            rows,
        }
    }

    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.rows.iter().map(|row| &row.person)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The universe of persons being partitioned: an ordered, duplicate-free list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSet {
    members: Vec<Person>,
}

impl PersonSet {
    /// Build from any sequence of persons, keeping the first occurrence of each.
    pub fn new<I>(persons: I) -> Self
    where
        I: IntoIterator<Item = Person>,
    {
        let mut seen = HashSet::new();
        let members = persons
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();
        Self { members }
    }

    /// Union of both rosters' ids, roster A first.
    pub fn from_rosters(roster_a: &Roster, roster_b: &Roster) -> Self {
        Self::new(roster_a.persons().chain(roster_b.persons()).cloned())
    }

    pub fn as_slice(&self) -> &[Person] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Person> {
        self.members.iter()
    }

    pub fn contains(&self, person: &Person) -> bool {
        self.members.contains(person)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<Person> for PersonSet {
    fn from_iter<T: IntoIterator<Item = Person>>(iter: T) -> Self {
        Self::new(iter)
    }
}
