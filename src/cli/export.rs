use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use kinship::{Config, Document, render, to_tree_with};
use tracing::{info, instrument};

use super::terminal;

#[derive(Debug, Parser)]
#[command(about = "Convert an interchange JSON document to GEDCOM")]
pub struct Export {
    /// The interchange JSON document
    input: PathBuf,

    /// Timestamp for the header, in RFC 3339 form (defaults to the current
    /// time)
    #[arg(long, value_parser = parse_timestamp)]
    now: Option<DateTime<Utc>>,

    /// Write the GEDCOM text to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|e| format!("{e}"))
}

impl Export {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let Some(text) = self.render(config)? else {
            println!(
                "{}",
                terminal::notice("Nothing to export: the document has no records.")
            );
            return Ok(());
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{text}\n"))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{}", terminal::written(&self.input, path));
            }
            None => println!("{text}"),
        }
        Ok(())
    }

    /// The rendered document, or `None` if it holds no records.
    fn render(&self, config: &Config) -> anyhow::Result<Option<String>> {
        let json = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;
        let document: Document = serde_json::from_str(&json)
            .with_context(|| format!("{} is not an interchange document", self.input.display()))?;

        let export = to_tree_with(&document, self.now.unwrap_or_else(Utc::now), config);
        info!(
            individuals = export.ids.individuals.len(),
            families = export.ids.families.len(),
            "built GEDCOM tree"
        );

        let text = render(&export.tree);
        Ok((!text.is_empty()).then_some(text))
    }
}
