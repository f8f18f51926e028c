use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use clap::Parser;
use prontuario::{CommandKind, Config, analysis::count_by_kind};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::instrument;
use walkdir::WalkDir;

use super::{
    OutputFormat,
    terminal::{Tone, paint},
};

#[derive(Debug, Parser)]
#[command(about = "Analyze every note in a directory")]
pub struct Scan {
    /// Directory to search for notes
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// File extension that identifies a note
    #[arg(long, default_value = "txt")]
    extension: String,

    /// Default date for commands without one (dd/mm/yyyy, defaults to today)
    #[arg(long, value_parser = super::parse_date)]
    date: Option<String>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct NoteSummary {
    path: PathBuf,
    persistent_items: usize,
    commands: Vec<(CommandKind, usize)>,
}

impl Scan {
    #[instrument(level = "debug", skip(self, config), fields(dir = %self.dir.display()))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let date = self.date.unwrap_or_else(prontuario::today);
        let paths = collect_note_paths(&self.dir, &self.extension);
        tracing::info!(notes = paths.len(), "scanning notes");

        let (summaries, unreadable): (Vec<_>, Vec<_>) = paths
            .par_iter()
            .map(|path| summarize(path, &date, config))
            .partition(Result::is_ok);

        let mut summaries: Vec<_> = summaries.into_iter().filter_map(Result::ok).collect();
        summaries.sort_by(|a, b| a.path.cmp(&b.path));

        for path in unreadable.into_iter().filter_map(Result::err) {
            tracing::warn!(path = %path.display(), "skipping unreadable note");
        }

        match self.output {
            OutputFormat::Pretty => print_summaries(&summaries),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        }
        Ok(())
    }
}

fn collect_note_paths(root: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new(extension)))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn summarize(path: &Path, date: &str, config: &Config) -> Result<NoteSummary, PathBuf> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        tracing::debug!("failed to read {}: {e}", path.display());
        path.to_path_buf()
    })?;

    let analysis = prontuario::analyze(&content, date, config);
    Ok(NoteSummary {
        path: path.to_path_buf(),
        persistent_items: analysis.persistent_items.len(),
        commands: count_by_kind(&analysis),
    })
}

fn print_summaries(summaries: &[NoteSummary]) {
    if summaries.is_empty() {
        println!("{}", paint("No notes found", Tone::Muted));
        return;
    }

    for summary in summaries {
        println!("{}", paint(&summary.path.display().to_string(), Tone::Heading));
        println!(
            "  {} {}",
            paint(&format!("{:<18}", "persistent items"), Tone::Muted),
            summary.persistent_items
        );
        for (kind, count) in &summary.commands {
            let tone = if *kind == CommandKind::Unrecognized {
                Tone::Warning
            } else {
                Tone::Action
            };
            println!("  {} {count}", paint(&format!("{:<18}", kind.to_string()), tone));
        }
    }
}
