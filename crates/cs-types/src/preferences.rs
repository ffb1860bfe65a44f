use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::person::Person;

/// One row of the preference table: a person and their ranked partners,
/// most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub person: Person,
    pub partners: Vec<Person>,
}

impl PreferenceRecord {
    pub fn new(person: impl Into<Person>, partners: Vec<Person>) -> Self {
        Self {
            person: person.into(),
            partners,
        }
    }
}

/// Person → ordered preference list.
///
/// Built once from input and read-only afterwards. Partners are not checked
/// against any person set; unknown partners simply never match when scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceModel {
    lists: HashMap<Person, Vec<Person>>,
}

impl PreferenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the model from table rows. If a person has several rows the first
    /// one is kept.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PreferenceRecord>,
    {
        let mut lists = HashMap::new();
        for record in records {
            if lists.contains_key(&record.person) {
                debug!("Ignoring repeated preference row for {}", record.person);
                continue;
            }
            lists.insert(record.person, record.partners);
        }
        Self { lists }
    }

    /// Builder used by tests and demos.
    pub fn with(mut self, person: &str, partners: &[&str]) -> Self {
        self.lists
            .entry(Person::from(person))
            .or_insert_with(|| partners.iter().map(|p| Person::from(*p)).collect());
        self
    }

    /// Ranked partners of `person`, or an empty slice when the person has no row.
    pub fn partners(&self, person: &Person) -> &[Person] {
        self.lists.get(person).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, person: &Person) -> bool {
        self.lists.contains_key(person)
    }

    /// Number of persons with a preference row.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
