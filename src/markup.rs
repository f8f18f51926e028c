//! The note markup: line scanning, section parsing and command
//! interpretation.
//!
//! A note is read one trimmed line at a time:
//!
//! - `[SECTION]` opens one of the fixed sections;
//! - `!!` declares persistent items (`!!MED`, `!!HPP`, or free info);
//! - lines starting with `!`, `+`, `--`, `>>` or `>` are action items;
//! - anything else is narrative text.
//!
//! [`parse`] builds the sectioned view. [`interpret`] turns one sigil line into
//! a [`Command`](crate::Command). The two are independent and pure.

mod date_suffix;
mod declaration;

mod interpreter;
pub use interpreter::interpret;

mod parser;
pub use parser::{ParsedNote, SectionParser, parse};

mod scanner;
pub use scanner::{Line, ScannedLine, Scanner, scan};

mod sigil;
pub use sigil::Sigil;
