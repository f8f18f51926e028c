use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the fixed narrative sections of a clinical note.
///
/// A section is opened by a header line consisting of the section name
/// wrapped in square brackets, e.g. `[CONDUTA]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Section {
    /// Patient history (`[ANAMNESE]`).
    #[serde(rename = "ANAMNESE")]
    Anamnese,
    /// Physical examination (`[EXAME FISICO]`).
    #[serde(rename = "EXAME FISICO")]
    ExameFisico,
    /// Diagnostic hypothesis (`[HIPOTESE DIAGNOSTICA]`).
    #[serde(rename = "HIPOTESE DIAGNOSTICA")]
    HipoteseDiagnostica,
    /// Plan of care (`[CONDUTA]`).
    #[serde(rename = "CONDUTA")]
    Conduta,
}

impl Section {
    /// All sections, in the order they are rendered.
    pub const ALL: [Self; 4] = [
        Self::Anamnese,
        Self::ExameFisico,
        Self::HipoteseDiagnostica,
        Self::Conduta,
    ];

    /// The name used between the brackets of a header line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Anamnese => "ANAMNESE",
            Self::ExameFisico => "EXAME FISICO",
            Self::HipoteseDiagnostica => "HIPOTESE DIAGNOSTICA",
            Self::Conduta => "CONDUTA",
        }
    }

    /// Recognises a header line such as `[ANAMNESE]`.
    ///
    /// The line must already be trimmed. Bracketed names outside the fixed set
    /// are not headers.
    #[must_use]
    pub fn from_header(line: &str) -> Option<Self> {
        line.strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .and_then(|name| name.parse().ok())
    }

    /// Renders the header line that opens this section.
    #[must_use]
    pub fn header(self) -> String {
        format!("[{}]", self.name())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = UnknownSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.name() == s)
            .ok_or_else(|| UnknownSectionError(s.to_string()))
    }
}

/// Error returned when a name is not one of the fixed section names.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown section '{0}'")]
pub struct UnknownSectionError(String);
