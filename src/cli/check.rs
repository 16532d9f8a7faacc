use std::{path::PathBuf, process};

use anyhow::Context;
use clap::Parser;
use kinship::{DomainGraph, FlattenError, LineError, flatten_lenient, parse_with_diagnostics};
use tracing::instrument;

use super::terminal;

#[derive(Debug, Parser)]
#[command(about = "Report malformed lines and unusable records in a GEDCOM file")]
pub struct Check {
    /// The GEDCOM file to check
    path: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Everything found while reading one file.
#[derive(Debug)]
struct Report {
    graph: DomainGraph,
    skipped_lines: Vec<LineError>,
    record_errors: Vec<FlattenError>,
}

impl Report {
    fn from_text(text: &str) -> Self {
        let (forest, skipped_lines) = parse_with_diagnostics(text);
        let (graph, record_errors) = flatten_lenient(&forest);
        Self {
            graph,
            skipped_lines,
            record_errors,
        }
    }

    fn problem_count(&self) -> usize {
        self.skipped_lines.len() + self.record_errors.len()
    }

    fn counts(&self) -> [(&'static str, usize); 8] {
        let graph = &self.graph;
        [
            ("Individuals", graph.individuals.len()),
            ("Families", graph.families.len()),
            ("Sources", graph.sources.len()),
            ("Repositories", graph.repositories.len()),
            ("Media", graph.media.len()),
            ("Notes", graph.notes.len()),
            ("Places", graph.places.len()),
            ("Citations", graph.citations.len()),
        ]
    }
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let report = Report::from_text(&text);

        match self.output {
            OutputFormat::Table => self.output_table(&report),
            OutputFormat::Json => Self::output_json(&report)?,
        }

        // Exit with a non-zero code when the file needs attention.
        if report.problem_count() > 0 {
            process::exit(2);
        }
        Ok(())
    }

    fn output_table(&self, report: &Report) {
        println!("Checking {}...\n", self.path.display());

        for (label, count) in report.counts() {
            if count > 0 {
                println!("  {label:<14}{count}");
            }
        }
        if report.graph.record_count() == 0 {
            println!("  {}", terminal::notice("No records found"));
        }

        if !report.skipped_lines.is_empty() {
            println!(
                "\n{}",
                terminal::problem_heading("Skipped lines", report.skipped_lines.len())
            );
            for error in &report.skipped_lines {
                println!("  • {error}");
            }
        }

        if !report.record_errors.is_empty() {
            println!(
                "\n{}",
                terminal::problem_heading("Unusable records", report.record_errors.len())
            );
            for error in &report.record_errors {
                println!("  • {error}");
            }
        }

        println!("\n{}", terminal::verdict(report.problem_count()));
    }

    fn output_json(report: &Report) -> anyhow::Result<()> {
        use serde_json::json;

        let counts: serde_json::Map<_, _> = report
            .counts()
            .into_iter()
            .map(|(label, count)| (label.to_lowercase(), json!(count)))
            .collect();

        let output = json!({
            "records": counts,
            "skipped_lines": report
                .skipped_lines
                .iter()
                .map(|error| json!({
                    "line_number": error.line_number,
                    "line": error.line,
                    "reason": error.kind.to_string(),
                }))
                .collect::<Vec<_>>(),
            "record_errors": report
                .record_errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_file_has_no_problems() {
        let report = Report::from_text("0 HEAD\n0 @I1@ INDI\n0 @F1@ FAM\n1 HUSB @I1@\n0 TRLR");

        assert_eq!(report.problem_count(), 0);
        let counts = report.counts();
        assert_eq!(counts[0], ("Individuals", 1));
        assert_eq!(counts[1], ("Families", 1));
    }

    #[test]
    fn problems_are_collected() {
        let report = Report::from_text("0 @I1@ INDI\ngarbage\n0 FAM\n1 HUSB @I1@\n0 @N1@ NOTE");

        assert_eq!(report.skipped_lines.len(), 1);
        assert_eq!(report.skipped_lines[0].line_number, 2);
        assert_eq!(report.record_errors.len(), 1);
        assert_eq!(report.problem_count(), 2);
        assert_eq!(report.graph.record_count(), 2);
    }
}
