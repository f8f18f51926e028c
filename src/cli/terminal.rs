//! Terminal colouring for note output

use owo_colors::{OwoColorize, colors::css};
use prontuario::{Command, EntryKind};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// How a piece of output is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Section titles and headings (bold)
    Heading,
    /// Action lines and recognised commands (blue)
    Action,
    /// Persistent attributes (green)
    Attribute,
    /// Lines that could not be fully interpreted (amber)
    Warning,
    /// Secondary information (dimmed)
    Muted,
    /// Narrative text (unstyled)
    Plain,
}

impl Tone {
    /// The tone used for a section entry of the given kind.
    pub const fn for_entry(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Text => Self::Plain,
            EntryKind::ActionItem => Self::Action,
            EntryKind::MenuItem => Self::Attribute,
        }
    }

    /// The tone used for an interpreted command.
    pub const fn for_command(command: &Command) -> Self {
        if command.is_complete() {
            Self::Action
        } else {
            Self::Warning
        }
    }
}

/// Paints `text` in `tone`, or returns it unchanged when colour is unsupported.
pub fn paint(text: &str, tone: Tone) -> String {
    if tone == Tone::Plain || !supports_color() {
        return text.to_string();
    }

    match tone {
        Tone::Heading => text.bold().to_string(),
        Tone::Action => text.fg::<css::LightBlue>().to_string(),
        Tone::Attribute => text.fg::<css::Green>().to_string(),
        Tone::Warning => text.fg::<css::Orange>().to_string(),
        Tone::Muted => text.dimmed().to_string(),
        Tone::Plain => text.to_string(),
    }
}
