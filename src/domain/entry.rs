use std::borrow::Cow;

use serde::Serialize;

use crate::domain::PersistentItem;

/// A classified line recorded inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "EntryRepr")]
pub enum Entry {
    /// Narrative text, kept verbatim.
    Text(String),
    /// A line starting with an action sigil, kept verbatim.
    ActionItem(String),
    /// A persistent attribute declared while the section was open.
    MenuItem(PersistentItem),
}

/// The type tag of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// See [`Entry::Text`].
    Text,
    /// See [`Entry::ActionItem`].
    ActionItem,
    /// See [`Entry::MenuItem`].
    MenuItem,
}

impl Entry {
    /// The type tag of this entry.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Text(_) => EntryKind::Text,
            Self::ActionItem(_) => EntryKind::ActionItem,
            Self::MenuItem(_) => EntryKind::MenuItem,
        }
    }

    /// The display content of this entry.
    ///
    /// Menu items are shown with their category label, e.g.
    /// `MED: Dipirona[10/05/2024]`.
    #[must_use]
    pub fn content(&self) -> Cow<'_, str> {
        match self {
            Self::Text(line) | Self::ActionItem(line) => Cow::Borrowed(line),
            Self::MenuItem(item) => Cow::Owned(item.menu_label()),
        }
    }

    /// The markup line that reproduces this entry when parsed again.
    #[must_use]
    pub fn to_markup(&self) -> Cow<'_, str> {
        match self {
            Self::Text(line) | Self::ActionItem(line) => Cow::Borrowed(line),
            Self::MenuItem(item) => Cow::Owned(item.declaration()),
        }
    }
}

#[derive(Serialize)]
struct EntryRepr {
    #[serde(rename = "type")]
    kind: EntryKind,
    content: String,
}

impl From<Entry> for EntryRepr {
    fn from(entry: Entry) -> Self {
        Self {
            kind: entry.kind(),
            content: entry.content().into_owned(),
        }
    }
}
