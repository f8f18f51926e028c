use std::path::PathBuf;

use clap::Parser;
use prontuario::{Command, Config, NoteAnalysis};
use tracing::instrument;

use super::{
    OutputFormat,
    interpret::print_command,
    parse::{print_persistent_items, print_sections},
    terminal::{Tone, paint},
};

#[derive(Debug, Parser)]
#[command(about = "Extract sections, persistent items and commands from a note")]
pub struct Analyze {
    /// The note file to analyze ('-' reads from stdin)
    note: PathBuf,

    /// Default date for commands without one (dd/mm/yyyy, defaults to today)
    #[arg(long, value_parser = super::parse_date)]
    date: Option<String>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

impl Analyze {
    #[instrument(level = "debug", skip(self, config), fields(note = %self.note.display()))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let content = super::read_note(&self.note)?;
        let date = self.date.unwrap_or_else(prontuario::today);
        let analysis = prontuario::analyze(&content, &date, config);

        match self.output {
            OutputFormat::Pretty => print_analysis(&analysis),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        }
        Ok(())
    }
}

fn print_analysis(analysis: &NoteAnalysis) {
    print_sections(&analysis.sections);
    print_persistent_items(&analysis.persistent_items);

    print_commands("Prescriptions", &analysis.prescriptions);
    print_commands("Exams", &analysis.exams);
    print_commands("Referrals", &analysis.referrals);
    print_commands("Medication adjustments", &analysis.medication_adjustments);

    if !analysis.unrecognized.is_empty() {
        println!();
        println!("{}", paint("Unrecognized", Tone::Heading));
        for line in &analysis.unrecognized {
            println!("  {}", paint(line, Tone::Warning));
        }
    }
}

fn print_commands(title: &str, commands: &[Command]) {
    if commands.is_empty() {
        return;
    }

    println!();
    println!("{}", paint(&format!("{title} ({})", commands.len()), Tone::Heading));
    for command in commands {
        print_command(command);
    }
}
