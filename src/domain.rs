//! Domain models for clinical notes.
//!
//! This module contains the types produced by parsing a note: sections and
//! their classified lines, persistent patient attributes, and commands, plus
//! the configuration of note analysis.

mod command;
pub use command::{Command, CommandKind};

mod config;
pub use config::{AdjustmentScope, CONFIG_FILE_NAME, Config, ConfigError};

mod date;
pub use date::{DATE_FORMAT, format_date, today};

mod entry;
pub use entry::{Entry, EntryKind};

/// Persistent patient attributes and the save-time merge rule.
pub mod persistent;
pub use persistent::{Category, MergeReport, PersistentItem, PersistentItems};

mod section;
pub use section::{Section, UnknownSectionError};

mod sections;
pub use sections::Sections;
