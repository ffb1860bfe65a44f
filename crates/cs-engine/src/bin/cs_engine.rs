use anyhow::{bail, Context};
use cs_data::InputSources;
use cs_engine::{render, OutputFormat, PartitionEngine};
use cs_types::PartitionConfig;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: cs-engine <roster_a.csv> <roster_b.csv> <preferences.csv>";

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [roster_a, roster_b, preferences] = args.as_slice() else {
        bail!(USAGE);
    };

    let config = PartitionConfig::from_env().context("invalid partition configuration")?;
    let format = OutputFormat::from_env()?;

    let engine = PartitionEngine::new(config);
    let (inputs, report) = engine.load_and_run(
        &InputSources::roster_a(roster_a),
        &InputSources::roster_b(roster_b),
        &InputSources::preferences(preferences),
    )?;

    println!("{}", render(format, Some(&inputs), &report)?);
    Ok(())
}
