pub mod loaders;
pub mod sources;

pub use loaders::*;
pub use sources::*;

use cs_types::{CsResult, DataError, PersonSet, PreferenceModel, Roster};

/// The three inputs of a run: both rosters and the preference table.
#[derive(Debug, Clone, Default)]
pub struct InputBundle {
    pub roster_a: Roster,
    pub roster_b: Roster,
    pub preferences: PreferenceTable,
}

impl InputBundle {
    /// Load all three inputs. Every file source is checked for existence
    /// before anything is parsed, so a missing input never leaves a
    /// half-loaded bundle behind.
    pub fn load(
        roster_a: &InputSource,
        roster_b: &InputSource,
        preferences: &InputSource,
    ) -> CsResult<Self> {
        for source in [roster_a, roster_b, preferences] {
            ensure_present(source)?;
        }

        let loader = TableLoader::new();
        let bundle = Self {
            roster_a: read_roster(&loader, roster_a)?,
            roster_b: read_roster(&loader, roster_b)?,
            preferences: read_preferences(&loader, preferences)?,
        };

        tracing::info!(
            "Loaded inputs: {} + {} roster rows, {} preference rows",
            bundle.roster_a.len(),
            bundle.roster_b.len(),
            bundle.preferences.len()
        );
        Ok(bundle)
    }

    /// Union of the roster ids. Persons that only appear in the preference
    /// table are not placed.
    pub fn person_set(&self) -> PersonSet {
        PersonSet::from_rosters(&self.roster_a, &self.roster_b)
    }

    pub fn preference_model(&self) -> PreferenceModel {
        PreferenceModel::from_records(self.preferences.records.iter().cloned())
    }
}

fn ensure_present(source: &InputSource) -> CsResult<()> {
    if let InputSourceType::File(path) = &source.source_type {
        if !path.is_file() {
            return Err(DataError::MissingInput {
                name: source.name.clone(),
                path: source.location(),
            }
            .into());
        }
    }
    Ok(())
}

fn read_roster(loader: &TableLoader, source: &InputSource) -> CsResult<Roster> {
    match &source.source_type {
        InputSourceType::File(path) => loader.load_roster_file(path),
        InputSourceType::Inline(text) => loader.parse_roster(text.as_bytes()),
    }
}

fn read_preferences(loader: &TableLoader, source: &InputSource) -> CsResult<PreferenceTable> {
    match &source.source_type {
        InputSourceType::File(path) => loader.load_preferences_file(path),
        InputSourceType::Inline(text) => loader.parse_preferences(text.as_bytes()),
    }
}
