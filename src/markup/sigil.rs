//! Sigils: the leading character sequences that mark a line as structured.

/// A sigil recognised by the command interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// `!!`, a persistent item declaration. Never a command.
    Declaration,
    /// `>`, a keyword order such as `prescrever`.
    Order,
    /// `++`, increase a medication's dose.
    IncreaseDose,
    /// `--`, decrease a medication's dose.
    DecreaseDose,
    /// `+`, start a medication.
    AddMedication,
    /// `-`, stop a medication.
    RemoveMedication,
    /// `!`, replace one medication with another.
    ChangeMedication,
}

/// Command sigils in dispatch order.
///
/// `>` is checked first. Two-character sigils precede their one-character
/// prefixes so that `++` is never read as `+`.
const COMMAND_SIGILS: [(&str, Sigil); 7] = [
    (">", Sigil::Order),
    ("!!", Sigil::Declaration),
    ("++", Sigil::IncreaseDose),
    ("--", Sigil::DecreaseDose),
    ("+", Sigil::AddMedication),
    ("-", Sigil::RemoveMedication),
    ("!", Sigil::ChangeMedication),
];

/// Prefixes that make a line an action item in the section view.
///
/// A single `-` is absent: a line such as `- febre há 3 dias` is
/// narrative text in the section view.
pub(crate) const ACTION_PREFIXES: [&str; 5] = ["!", "+", "--", ">>", ">"];

/// The prefix of a persistent item declaration.
pub(crate) const DECLARATION_PREFIX: &str = "!!";

impl Sigil {
    /// Detects the sigil at the start of `line`, returning it with the rest of
    /// the line.
    ///
    /// ```
    /// use prontuario::markup::Sigil;
    ///
    /// assert_eq!(Sigil::detect("++Metformina"), Some((Sigil::IncreaseDose, "Metformina")));
    /// assert_eq!(Sigil::detect("Metformina"), None);
    /// ```
    #[must_use]
    pub fn detect(line: &str) -> Option<(Self, &str)> {
        COMMAND_SIGILS
            .iter()
            .find_map(|(prefix, sigil)| line.strip_prefix(prefix).map(|rest| (*sigil, rest)))
    }

    /// The literal text of this sigil.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Declaration => "!!",
            Self::Order => ">",
            Self::IncreaseDose => "++",
            Self::DecreaseDose => "--",
            Self::AddMedication => "+",
            Self::RemoveMedication => "-",
            Self::ChangeMedication => "!",
        }
    }

    /// Whether lines with this sigil produce a command.
    #[must_use]
    pub const fn is_command(self) -> bool {
        !matches!(self, Self::Declaration)
    }

    /// Whether this sigil adjusts the medication list.
    #[must_use]
    pub const fn is_medication_adjustment(self) -> bool {
        !matches!(self, Self::Declaration | Self::Order)
    }
}

/// Whether `line` is an action item in the section view.
pub(crate) fn is_action(line: &str) -> bool {
    ACTION_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}
