use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Entry, Section};

/// The structured view of a note: every section with its classified lines.
///
/// All four sections are always present, possibly empty. Lines keep the order
/// in which they appeared in the note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sections(BTreeMap<Section, Vec<Entry>>);

impl Default for Sections {
    fn default() -> Self {
        Self(Section::ALL.into_iter().map(|s| (s, Vec::new())).collect())
    }
}

impl Sections {
    /// Returns the entries recorded in `section`.
    #[must_use]
    pub fn get(&self, section: Section) -> &[Entry] {
        self.0.get(&section).map(Vec::as_slice).unwrap_or_default()
    }

    /// Appends an entry to `section`.
    pub fn push(&mut self, section: Section, entry: Entry) {
        self.0.entry(section).or_default().push(entry);
    }

    /// Iterates over the sections in their canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &[Entry])> {
        self.0.iter().map(|(section, entries)| (*section, entries.as_slice()))
    }

    /// Whether no section holds any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Renders the sections back into note markup.
    ///
    /// Empty sections are omitted. Parsing the result yields the same sections.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for (section, entries) in self.iter().filter(|(_, e)| !e.is_empty()) {
            out.push_str(&section.header());
            out.push('\n');
            for entry in entries {
                out.push_str(&entry.to_markup());
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_every_section() {
        let sections = Sections::default();

        assert!(sections.is_empty());
        assert_eq!(
            sections.iter().map(|(s, _)| s).collect::<Vec<_>>(),
            Section::ALL.to_vec()
        );
    }

    #[test]
    fn serialises_all_sections_by_name() {
        let mut sections = Sections::default();
        sections.push(Section::Conduta, Entry::ActionItem("+AAS".to_string()));

        let json = serde_json::to_value(&sections).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "ANAMNESE": [],
                "EXAME FISICO": [],
                "HIPOTESE DIAGNOSTICA": [],
                "CONDUTA": [{"type": "action_item", "content": "+AAS"}],
            })
        );
    }

    #[test]
    fn markup_skips_empty_sections() {
        let mut sections = Sections::default();
        sections.push(Section::Anamnese, Entry::Text("Dor lombar.".to_string()));
        sections.push(Section::Anamnese, Entry::ActionItem("> solicitar RX".to_string()));

        assert_eq!(sections.to_markup(), "[ANAMNESE]\nDor lombar.\n> solicitar RX\n");
    }
}
