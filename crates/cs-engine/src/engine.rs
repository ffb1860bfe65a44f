// Partitioning engine: ties input loading, the candidate pool builder and
// report assembly together.

use cs_data::{InputBundle, InputSource};
use cs_optimizer::{CandidatePoolBuilder, PartitionReport};
use cs_types::{CsResult, PartitionConfig, PersonSet, PreferenceModel};
use tracing::info;

/// Runs one partitioning job per call; holds no state between runs.
#[derive(Debug, Clone)]
pub struct PartitionEngine {
    config: PartitionConfig,
}

impl PartitionEngine {
    pub fn new(config: PartitionConfig) -> Self {
        Self { config }
    }

    /// Partition `persons` and build the report of the top candidates.
    pub fn run(&self, persons: &PersonSet, prefs: &PreferenceModel) -> CsResult<PartitionReport> {
        let pool = CandidatePoolBuilder::new(self.config.clone()).build(persons, prefs)?;
        Ok(PartitionReport::new(&pool, prefs, &self.config, persons.len()))
    }

    /// Run on already loaded inputs.
    pub fn run_inputs(&self, inputs: &InputBundle) -> CsResult<PartitionReport> {
        let persons = inputs.person_set();
        let prefs = inputs.preference_model();
        info!(
            "Partitioning {} persons with {} preference lists",
            persons.len(),
            prefs.len()
        );
        self.run(&persons, &prefs)
    }

    /// Load the three inputs and run. The bundle is returned for display.
    pub fn load_and_run(
        &self,
        roster_a: &InputSource,
        roster_b: &InputSource,
        preferences: &InputSource,
    ) -> CsResult<(InputBundle, PartitionReport)> {
        let inputs = InputBundle::load(roster_a, roster_b, preferences)?;
        let report = self.run_inputs(&inputs)?;
        Ok((inputs, report))
    }
}

impl Default for PartitionEngine {
    fn default() -> Self {
        Self::new(PartitionConfig::default())
    }
}
