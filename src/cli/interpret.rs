use clap::Parser;
use prontuario::Command;
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{Tone, paint},
};

#[derive(Debug, Parser)]
#[command(about = "Interpret a single command line")]
pub struct Interpret {
    /// The line to interpret, e.g. '> solicitar Hemograma'
    #[arg(allow_hyphen_values = true)]
    line: String,

    /// Default date for the command (dd/mm/yyyy, defaults to today)
    #[arg(long, value_parser = super::parse_date)]
    date: Option<String>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

impl Interpret {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let date = self.date.unwrap_or_else(prontuario::today);
        let command = prontuario::interpret(&self.line, &date);

        match self.output {
            OutputFormat::Pretty => print_command(&command),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&command)?),
        }
        Ok(())
    }
}

/// Prints one command as its kind followed by its fields.
pub(super) fn print_command(command: &Command) {
    let tone = Tone::for_command(command);
    println!("{}", paint(&command.kind().to_string(), tone));
    for (name, value) in fields(command) {
        let value = value.unwrap_or("(missing)");
        println!("  {} {value}", paint(&format!("{name:<16}"), Tone::Muted));
    }
}

fn fields(command: &Command) -> Vec<(&'static str, Option<&str>)> {
    match command {
        Command::Prescription {
            medication,
            dosage,
            interval,
            duration,
            date,
        } => vec![
            ("medication", Some(medication.as_str())),
            ("dosage", Some(dosage.as_str())),
            ("interval", Some(interval.as_str())),
            ("duration", Some(duration.as_str())),
            ("date", Some(date.as_str())),
        ],
        Command::Exam { exam, date } => {
            vec![("exam", Some(exam.as_str())), ("date", Some(date.as_str()))]
        }
        Command::Referral { specialty, date } => vec![
            ("specialty", Some(specialty.as_str())),
            ("date", Some(date.as_str())),
        ],
        Command::AddMedication { medication, date }
        | Command::RemoveMedication { medication, date }
        | Command::IncreaseDose { medication, date }
        | Command::DecreaseDose { medication, date } => {
            vec![("medication", Some(medication.as_str())), ("date", Some(date.as_str()))]
        }
        Command::ChangeMedication {
            from_medication,
            to_medication,
            date,
        } => vec![
            ("from_medication", from_medication.as_deref()),
            ("to_medication", to_medication.as_deref()),
            ("date", Some(date.as_str())),
        ],
        Command::Unrecognized { raw } => vec![("raw", Some(raw.as_str()))],
    }
}
