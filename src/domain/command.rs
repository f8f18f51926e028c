use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A clinical order or medication adjustment extracted from one sigil line.
///
/// Field extraction is lenient: a recognised command whose body does not
/// match the expected shape still carries its type, with empty or missing
/// fields. Every `date` is `dd/mm/yyyy`, either taken from a trailing
/// `[...]` on the line or defaulted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// `> prescrever <medication> <dosage> <interval> <duration>`
    Prescription {
        /// Medication name.
        medication: String,
        /// Dosage, e.g. `500mg`.
        dosage: String,
        /// Dosing interval, e.g. `8/8h`.
        interval: String,
        /// Treatment duration, e.g. `7 dias`.
        duration: String,
        /// Date of the prescription.
        date: String,
    },
    /// `> solicitar <exam>`
    Exam {
        /// The requested exam.
        exam: String,
        /// Date of the request.
        date: String,
    },
    /// `> encaminhar [para] <specialty>`
    Referral {
        /// The specialty the patient is referred to.
        specialty: String,
        /// Date of the referral.
        date: String,
    },
    /// `+<medication>`
    AddMedication {
        /// Medication to start.
        medication: String,
        /// Date of the change.
        date: String,
    },
    /// `-<medication>`
    RemoveMedication {
        /// Medication to stop.
        medication: String,
        /// Date of the change.
        date: String,
    },
    /// `!<from> > <to>`
    ///
    /// Both names are `None` when the line has no `>` separator.
    ChangeMedication {
        /// Medication being replaced.
        from_medication: Option<String>,
        /// Replacement medication.
        to_medication: Option<String>,
        /// Date of the change.
        date: String,
    },
    /// `++<medication>`
    IncreaseDose {
        /// Medication whose dose goes up.
        medication: String,
        /// Date of the change.
        date: String,
    },
    /// `--<medication>`
    DecreaseDose {
        /// Medication whose dose goes down.
        medication: String,
        /// Date of the change.
        date: String,
    },
    /// A sigil line whose keyword was not recognised.
    ///
    /// Serialised with `"recognized": false` next to the raw line.
    #[serde(rename = "unknown", serialize_with = "serialize_unrecognized")]
    Unrecognized {
        /// The line as written.
        raw: String,
    },
}

fn serialize_unrecognized<S: Serializer>(raw: &str, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct UnrecognizedRepr<'a> {
        raw: &'a str,
        recognized: bool,
    }

    UnrecognizedRepr {
        raw,
        recognized: false,
    }
    .serialize(serializer)
}

/// The type of a [`Command`], without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// See [`Command::Prescription`].
    Prescription,
    /// See [`Command::Exam`].
    Exam,
    /// See [`Command::Referral`].
    Referral,
    /// See [`Command::AddMedication`].
    AddMedication,
    /// See [`Command::RemoveMedication`].
    RemoveMedication,
    /// See [`Command::ChangeMedication`].
    ChangeMedication,
    /// See [`Command::IncreaseDose`].
    IncreaseDose,
    /// See [`Command::DecreaseDose`].
    DecreaseDose,
    /// See [`Command::Unrecognized`].
    #[serde(rename = "unknown")]
    Unrecognized,
}

impl CommandKind {
    /// Whether commands of this kind adjust the patient's medication list.
    #[must_use]
    pub const fn is_medication_adjustment(self) -> bool {
        matches!(
            self,
            Self::AddMedication
                | Self::RemoveMedication
                | Self::ChangeMedication
                | Self::IncreaseDose
                | Self::DecreaseDose
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Prescription => "prescription",
            Self::Exam => "exam",
            Self::Referral => "referral",
            Self::AddMedication => "add_medication",
            Self::RemoveMedication => "remove_medication",
            Self::ChangeMedication => "change_medication",
            Self::IncreaseDose => "increase_dose",
            Self::DecreaseDose => "decrease_dose",
            Self::Unrecognized => "unknown",
        })
    }
}

impl Command {
    /// The type of this command.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Prescription { .. } => CommandKind::Prescription,
            Self::Exam { .. } => CommandKind::Exam,
            Self::Referral { .. } => CommandKind::Referral,
            Self::AddMedication { .. } => CommandKind::AddMedication,
            Self::RemoveMedication { .. } => CommandKind::RemoveMedication,
            Self::ChangeMedication { .. } => CommandKind::ChangeMedication,
            Self::IncreaseDose { .. } => CommandKind::IncreaseDose,
            Self::DecreaseDose { .. } => CommandKind::DecreaseDose,
            Self::Unrecognized { .. } => CommandKind::Unrecognized,
        }
    }

    /// Whether the line was recognised as a known command.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }

    /// The date the command applies from, if it is a recognised command.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        match self {
            Self::Prescription { date, .. }
            | Self::Exam { date, .. }
            | Self::Referral { date, .. }
            | Self::AddMedication { date, .. }
            | Self::RemoveMedication { date, .. }
            | Self::ChangeMedication { date, .. }
            | Self::IncreaseDose { date, .. }
            | Self::DecreaseDose { date, .. } => Some(date.as_str()),
            Self::Unrecognized { .. } => None,
        }
    }

    /// Whether the structured fields were extracted.
    ///
    /// Only a `change_medication` line without a `>` separator, or an
    /// unrecognised line, lacks them.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        match self {
            Self::ChangeMedication {
                from_medication,
                to_medication,
                ..
            } => from_medication.is_some() && to_medication.is_some(),
            Self::Unrecognized { .. } => false,
            _ => true,
        }
    }
}
