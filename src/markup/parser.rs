use serde::Serialize;
use tracing::instrument;

use crate::{
    domain::{Entry, PersistentItem, Sections},
    markup::{Line, ScannedLine, scan},
};

/// The structured view of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedNote {
    /// Every section with its classified lines.
    pub sections: Sections,
    /// Every persistent item declared in the note, in declaration order,
    /// whether or not a section was open.
    pub persistent_items: Vec<PersistentItem>,
}

/// Parses a note into sections and persistent items.
///
/// Parsing never fails. Lines outside any section are dropped from the
/// section view, but their `!!` declarations are still collected.
///
/// ```
/// use prontuario::{Entry, Section};
///
/// let note = prontuario::parse("[ANAMNESE]\nPaciente refere dor.\n!!HPP Asma");
///
/// assert_eq!(
///     note.sections.get(Section::Anamnese)[0],
///     Entry::Text("Paciente refere dor.".to_string())
/// );
/// assert_eq!(note.persistent_items[0].item, "Asma");
/// ```
#[must_use]
#[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
pub fn parse(text: &str) -> ParsedNote {
    let mut parser = SectionParser::default();
    for line in scan(text) {
        parser.feed(&line);
    }
    parser.finish()
}

/// Accumulates scanned lines into a [`ParsedNote`].
///
/// [`parse`] drives this over a whole note. It is exposed so that callers
/// which need to look at every scanned line themselves can build the section
/// view in the same pass.
#[derive(Debug, Default)]
pub struct SectionParser {
    note: ParsedNote,
}

impl SectionParser {
    /// Creates an empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one scanned line.
    pub fn feed(&mut self, scanned: &ScannedLine<'_>) {
        match (&scanned.line, scanned.section) {
            (Line::Header(_), _) => {}
            (Line::Declaration(items), section) => {
                self.note.persistent_items.extend(items.iter().cloned());
                if let Some(section) = section {
                    for item in items {
                        self.note
                            .sections
                            .push(section, Entry::MenuItem(item.clone()));
                    }
                }
            }
            (Line::Action(text), Some(section)) => {
                self.note
                    .sections
                    .push(section, Entry::ActionItem((*text).to_string()));
            }
            (Line::Text(text), Some(section)) => {
                self.note.sections.push(section, Entry::Text((*text).to_string()));
            }
            (Line::Action(text) | Line::Text(text), None) => {
                tracing::trace!(line = *text, "dropping line outside any section");
            }
        }
    }

    /// Returns the parsed note.
    #[must_use]
    pub fn finish(self) -> ParsedNote {
        self.note
    }
}
