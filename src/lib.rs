//! Plain-text clinical notes
//!
//! Notes are written in a small line-oriented markup. This crate splits them
//! into sections, collects the persistent patient attributes they declare and
//! interprets the clinical orders and medication adjustments they contain.

pub mod domain;
pub use domain::{
    AdjustmentScope, Category, Command, CommandKind, Config, ConfigError, Entry, EntryKind,
    MergeReport, PersistentItem, PersistentItems, Section, Sections, format_date, today,
};

pub mod markup;
pub use markup::{ParsedNote, interpret, parse};

pub mod analysis;
pub use analysis::{NoteAnalysis, analyze};
