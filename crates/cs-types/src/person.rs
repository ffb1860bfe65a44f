use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque identifier of a person to be placed into a group
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Person(String);

impl Person {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Person {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Person {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for Person {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Person {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Convenience for building person lists in tests and demos.
pub fn people<I, S>(ids: I) -> Vec<Person>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Person::new).collect()
}
