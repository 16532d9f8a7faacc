use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use kinship::{Config, Document, flatten, flatten_lenient, parse, to_interchange};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{info, instrument, warn};
use walkdir::WalkDir;

use super::terminal;

#[derive(Debug, Parser)]
#[command(about = "Convert GEDCOM files to interchange JSON")]
pub struct Import {
    /// GEDCOM files, or directories to search for `.ged` files
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Print the JSON to stdout instead of writing `<name>.json` next to each
    /// input
    #[arg(long)]
    stdout: bool,
}

impl Import {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let files = collect_files(&self.paths);
        if files.is_empty() {
            println!("{}", terminal::notice("No GEDCOM files found."));
            return Ok(());
        }
        info!(count = files.len(), "converting GEDCOM files");

        let results: Vec<_> = files
            .par_iter()
            .map(|path| convert_file(path, config).map(|json| (path, json)))
            .collect();

        let mut failures = 0;
        for result in results {
            if let Err(error) = result.and_then(|(path, json)| self.emit(path, &json)) {
                failures += 1;
                eprintln!("{}", terminal::failed(&error));
            }
        }

        if failures > 0 {
            anyhow::bail!("{failures} of {} files could not be converted", files.len());
        }
        Ok(())
    }

    fn emit(&self, source: &Path, json: &str) -> anyhow::Result<()> {
        if self.stdout {
            println!("{json}");
            return Ok(());
        }

        let target = json_target(source)?;
        std::fs::write(&target, json)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        println!("{}", terminal::written(source, &target));
        Ok(())
    }
}

/// The `<stem>.json` path written for a GEDCOM file.
fn json_target(source: &Path) -> anyhow::Result<PathBuf> {
    let target = source.with_extension("json");
    if target == source {
        anyhow::bail!("Refusing to overwrite {} with its own conversion", source.display());
    }
    Ok(target)
}

/// Expands directories into the `.ged` files beneath them. Files given
/// explicitly are kept whatever their extension.
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<_> = WalkDir::new(path)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_type().is_file())
                .filter(|entry| is_gedcom(entry.path()))
                .map(walkdir::DirEntry::into_path)
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn is_gedcom(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| extension.eq_ignore_ascii_case("ged"))
}

fn convert_file(path: &Path, config: &Config) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = convert(&text, config).with_context(|| path.display().to_string())?;
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parses and flattens GEDCOM text, honouring the configured strictness.
fn convert(text: &str, config: &Config) -> anyhow::Result<Document> {
    let forest = parse(text);
    let graph = if config.strict {
        flatten(&forest)?
    } else {
        let (graph, errors) = flatten_lenient(&forest);
        if !errors.is_empty() {
            warn!(skipped = errors.len(), "records without identifiers were skipped");
        }
        graph
    };
    Ok(to_interchange(&graph))
}
