use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::Config;

/// The kind of patient attribute a persistent item records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// A medication in continuous use (`!!MED`).
    Med,
    /// A prior condition, i.e. past medical history (`!!HPP`).
    Hpp,
    /// Free-form information (any other `!!` declaration).
    Info,
}

impl Category {
    /// The keyword that introduces a declaration list of this category, if
    /// there is one.
    #[must_use]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Med => Some("MED"),
            Self::Hpp => Some("HPP"),
            Self::Info => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Self::Med => "MED",
            Self::Hpp => "HPP",
            Self::Info => "INFO",
        })
    }
}

/// A patient attribute that outlives the note it was declared in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersistentItem {
    /// What kind of attribute this is.
    pub category: Category,
    /// The attribute text, e.g. a medication name.
    pub item: String,
    /// The `dd/mm/yyyy` date the attribute started, when one was given.
    pub start_date: Option<String>,
}

impl PersistentItem {
    /// Creates a new persistent item.
    #[must_use]
    pub fn new(category: Category, item: impl Into<String>, start_date: Option<String>) -> Self {
        Self {
            category,
            item: item.into(),
            start_date,
        }
    }

    /// The text shown for this item when it is listed inside a section.
    ///
    /// ```
    /// use prontuario::{Category, PersistentItem};
    ///
    /// let med = PersistentItem::new(Category::Med, "Dipirona", Some("10/05/2024".into()));
    /// assert_eq!(med.menu_label(), "MED: Dipirona[10/05/2024]");
    ///
    /// let info = PersistentItem::new(Category::Info, "Alergia a penicilina", None);
    /// assert_eq!(info.menu_label(), "Alergia a penicilina");
    /// ```
    #[must_use]
    pub fn menu_label(&self) -> String {
        match self.category.keyword() {
            Some(keyword) => format!("{keyword}: {}{}", self.item, self.date_suffix()),
            None => self.item.clone(),
        }
    }

    /// Renders the `!!` declaration line that produces this item.
    #[must_use]
    pub fn declaration(&self) -> String {
        match self.category.keyword() {
            Some(keyword) => format!("!!{keyword} {}{}", self.item, self.date_suffix()),
            None => format!("!!{}", self.item),
        }
    }

    fn date_suffix(&self) -> String {
        self.start_date
            .as_deref()
            .map(|date| format!("[{date}]"))
            .unwrap_or_default()
    }
}

/// The persistent items currently recorded for one patient.
///
/// This is an in-memory model of the save-time merge rule. Storing it is the
/// caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistentItems(Vec<PersistentItem>);

/// Outcome of merging freshly parsed items into a patient's record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Medication items dropped because medications are replaced wholesale.
    pub removed: usize,
    /// Items added to the record.
    pub inserted: usize,
    /// Items skipped because an identical item was already recorded.
    pub skipped: usize,
}

impl PersistentItems {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Iterates over the recorded items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PersistentItem> {
        self.0.iter()
    }

    /// The number of recorded items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no items are recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the recorded items of one category.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &PersistentItem> {
        self.0.iter().filter(move |item| item.category == category)
    }

    /// Applies the items parsed from a newly saved note.
    ///
    /// Every recorded `MED` item is removed first, so the medication list always
    /// reflects the latest note. `HPP` and `INFO` items accumulate. An item is
    /// never inserted twice.
    ///
    /// When [`Config::date_undated_medications`] is set, medications declared
    /// without a date are recorded as starting on `save_date`.
    #[instrument(level = "debug", skip(self, parsed, config), fields(parsed = parsed.len()))]
    pub fn apply(
        &mut self,
        parsed: &[PersistentItem],
        save_date: &str,
        config: &Config,
    ) -> MergeReport {
        let before = self.0.len();
        self.0.retain(|item| item.category != Category::Med);
        let mut report = MergeReport {
            removed: before - self.0.len(),
            ..MergeReport::default()
        };

        for item in parsed {
            let mut item = item.clone();
            if item.category == Category::Med
                && item.start_date.is_none()
                && config.date_undated_medications
            {
                item.start_date = Some(save_date.to_string());
            }

            if self.0.contains(&item) {
                report.skipped += 1;
            } else {
                self.0.push(item);
                report.inserted += 1;
            }
        }

        tracing::debug!(?report, "merged persistent items");
        report
    }
}

impl From<Vec<PersistentItem>> for PersistentItems {
    fn from(items: Vec<PersistentItem>) -> Self {
        Self(items)
    }
}

impl<'a> IntoIterator for &'a PersistentItems {
    type Item = &'a PersistentItem;
    type IntoIter = std::slice::Iter<'a, PersistentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
