use cs_engine::{render_text, PartitionEngine};
use cs_optimizer::{group_score, optimize, person_in_group_score};
use cs_types::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("ClassSplit Basic Usage Example");

    // Two class rosters; the person set is their union
    let class_a = Roster::from_ids(["Ada", "Ben", "Cleo", "Dev"]);
    let class_b = Roster::from_ids(["Eli", "Fay", "Gus", "Ben"]);
    let persons = PersonSet::from_rosters(&class_a, &class_b);
    println!("Person set has {} members", persons.len());

    // Ranked friends, most preferred first
    let prefs = PreferenceModel::new()
        .with("Ada", &["Cleo", "Eli", "Gus"])
        .with("Ben", &["Dev"])
        .with("Cleo", &["Ada", "Fay"])
        .with("Dev", &["Ben", "Zed"]) // Zed is on no roster
        .with("Eli", &["Fay", "Ada"])
        .with("Fay", &["Eli"])
        .with("Gus", &["Ben", "Ada"]);

    // Optimize a single hand-made split
    let mut pair = GroupPair::new(
        people(["Ada", "Ben", "Eli", "Gus"]),
        people(["Cleo", "Dev", "Fay"]),
    );
    let before = group_score(&pair.group1, &prefs) + group_score(&pair.group2, &prefs);
    let stats = optimize(&mut pair, &prefs);
    println!(
        "Single split: score {} -> {} after {} swaps in {} passes",
        before,
        pair.total_score(),
        stats.swaps,
        stats.passes
    );
    for person in &pair.group1 {
        println!("  {} ({})", person, person_in_group_score(person, &pair.group1, &prefs));
    }

    // Full run: 100 restarts, top 3 distinct partitions
    let engine = PartitionEngine::new(PartitionConfig::new().with_seed(2024));
    let report = engine.run(&persons, &prefs)?;
    print!("{}", render_text(None, &report));

    Ok(())
}
