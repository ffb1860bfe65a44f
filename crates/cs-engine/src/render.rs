// Text and JSON rendering of partition reports

use std::fmt;
use std::str::FromStr;

use cs_data::{InputBundle, PreferenceTable};
use cs_optimizer::{GroupReport, PartitionReport};
use cs_types::{config_error, CsError, CsResult, Roster};
use serde::{Deserialize, Serialize};

pub const ENV_OUTPUT: &str = "CLASSSPLIT_OUTPUT";

/// Output formats supported by the command-line driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(config_error!("{ENV_OUTPUT}: unknown output format '{other}'")),
        }
    }
}

impl OutputFormat {
    pub fn from_env() -> CsResult<Self> {
        std::env::var(ENV_OUTPUT)
            .map(|raw| raw.parse())
            .unwrap_or(Ok(Self::Text))
    }
}

/// Render `report` (and, for text output, the input tables) in `format`.
pub fn render(
    format: OutputFormat,
    inputs: Option<&InputBundle>,
    report: &PartitionReport,
) -> CsResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(inputs, report)),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &PartitionReport) -> CsResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_text(inputs: Option<&InputBundle>, report: &PartitionReport) -> String {
    TextReport { inputs, report }.to_string()
}

/// Plain-text view of a report, optionally preceded by the input tables.
struct TextReport<'a> {
    inputs: Option<&'a InputBundle>,
    report: &'a PartitionReport,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(inputs) = self.inputs {
            write_roster(f, "Roster A", &inputs.roster_a)?;
            write_roster(f, "Roster B", &inputs.roster_b)?;
            write_preferences(f, &inputs.preferences)?;
        }

        let report = self.report;
        writeln!(
            f,
            "Run {} (seed {}): {} persons, {} distinct of {} restarts",
            report.run_id, report.seed, report.persons, report.stats.unique, report.stats.restarts
        )?;

        for pair in &report.pairs {
            writeln!(f)?;
            writeln!(f, "Pair {} (Combined Score: {})", pair.rank, pair.total_score)?;
            write_group(f, "List 1", &pair.group1)?;
            write_group(f, "List 2", &pair.group2)?;
        }
        Ok(())
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, label: &str, group: &GroupReport) -> fmt::Result {
    writeln!(f, "{} (Total: {}) Friendship Score: {}", label, group.size, group.score)?;
    for member in &group.members {
        writeln!(f, "  {} ({})", member.person, member.score)?;
    }
    Ok(())
}

fn write_roster(f: &mut fmt::Formatter<'_>, title: &str, roster: &Roster) -> fmt::Result {
    let rows = roster.rows.iter().map(|row| {
        std::iter::once(row.person.as_str())
            .chain(row.cells.iter().map(String::as_str))
            .collect::<Vec<_>>()
    });
    write_table(f, title, &roster.header, rows)
}

fn write_preferences(f: &mut fmt::Formatter<'_>, table: &PreferenceTable) -> fmt::Result {
    let rows = table.records.iter().map(|record| {
        std::iter::once(record.person.as_str())
            .chain(record.partners.iter().map(|p| p.as_str()))
            .collect::<Vec<_>>()
    });
    write_table(f, "Preferences", &table.header, rows)
}

fn write_table<'a, I>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    header: &[String],
    rows: I,
) -> fmt::Result
where
    I: Iterator<Item = Vec<&'a str>>,
{
    writeln!(f, "== {} ==", title)?;
    if header.is_empty() {
        writeln!(f, "No data")?;
        return writeln!(f);
    }
    writeln!(f, "{}", header.join(" | "))?;
    for row in rows {
        writeln!(f, "{}", row.join(" | "))?;
    }
    writeln!(f)
}
