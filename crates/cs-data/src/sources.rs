use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where an input table comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSource {
    /// Name used in logs and errors (e.g. "roster_a").
    pub name: String,
    pub source_type: InputSourceType,
}

/// Types of input sources supported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSourceType {
    /// Delimited text file on disk.
    File(PathBuf),
    /// Delimited text held in memory.
    Inline(String),
}

impl InputSource {
    pub fn file(name: &str, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.to_string(),
            source_type: InputSourceType::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn inline(name: &str, text: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            source_type: InputSourceType::Inline(text.into()),
        }
    }

    /// Human-readable location for messages.
    pub fn location(&self) -> String {
        match &self.source_type {
            InputSourceType::File(path) => path.display().to_string(),
            InputSourceType::Inline(_) => "<inline>".to_string(),
        }
    }
}

/// Conventional names of the three inputs
pub struct InputSources;

impl InputSources {
    pub const ROSTER_A: &'static str = "roster_a";
    pub const ROSTER_B: &'static str = "roster_b";
    pub const PREFERENCES: &'static str = "preferences";

    pub fn roster_a(path: impl AsRef<Path>) -> InputSource {
        InputSource::file(Self::ROSTER_A, path)
    }

    pub fn roster_b(path: impl AsRef<Path>) -> InputSource {
        InputSource::file(Self::ROSTER_B, path)
    }

    pub fn preferences(path: impl AsRef<Path>) -> InputSource {
        InputSource::file(Self::PREFERENCES, path)
    }
}
