use std::path::PathBuf;

use clap::Parser;
use prontuario::{PersistentItem, Sections};
use tracing::instrument;

use super::{
    OutputFormat,
    terminal::{Tone, paint},
};

#[derive(Debug, Parser)]
#[command(about = "Show the sections and persistent items of a note")]
pub struct Parse {
    /// The note file to parse ('-' reads from stdin)
    note: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,

    /// Print the note back as normalised markup instead
    #[arg(long, conflicts_with = "output")]
    markup: bool,
}

impl Parse {
    #[instrument(level = "debug", skip(self), fields(note = %self.note.display()))]
    pub fn run(self) -> anyhow::Result<()> {
        let content = super::read_note(&self.note)?;
        let parsed = prontuario::parse(&content);

        if self.markup {
            print!("{}", parsed.sections.to_markup());
            return Ok(());
        }

        match self.output {
            OutputFormat::Pretty => {
                print_sections(&parsed.sections);
                print_persistent_items(&parsed.persistent_items);
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&parsed)?),
        }
        Ok(())
    }
}

/// Prints every non-empty section with its entries.
pub(super) fn print_sections(sections: &Sections) {
    if sections.is_empty() {
        println!("{}", paint("No sections", Tone::Muted));
        return;
    }

    for (section, entries) in sections.iter().filter(|(_, e)| !e.is_empty()) {
        println!("{}", paint(&section.header(), Tone::Heading));
        for entry in entries {
            println!("  {}", paint(&entry.content(), Tone::for_entry(entry.kind())));
        }
        println!();
    }
}

/// Prints the persistent items declared in a note.
pub(super) fn print_persistent_items(items: &[PersistentItem]) {
    if items.is_empty() {
        return;
    }

    println!("{}", paint("Persistent items", Tone::Heading));
    for item in items {
        let since = item
            .start_date
            .as_deref()
            .map(|date| paint(&format!(" (since {date})"), Tone::Muted))
            .unwrap_or_default();
        println!(
            "  • {:<4} {}{since}",
            item.category,
            paint(&item.item, Tone::Attribute)
        );
    }
}
