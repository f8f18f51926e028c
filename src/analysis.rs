//! Note analysis: the composition of section parsing and command
//! interpretation performed when a note is saved.

use serde::Serialize;
use tracing::instrument;

use crate::{
    domain::{AdjustmentScope, Command, CommandKind, Config, PersistentItem, Section, Sections},
    markup::{ParsedNote, SectionParser, Sigil, interpret, scan},
};

/// Everything extracted from one note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteAnalysis {
    /// Every section with its classified lines.
    pub sections: Sections,
    /// Every persistent item declared in the note.
    pub persistent_items: Vec<PersistentItem>,
    /// `> prescrever` orders.
    pub prescriptions: Vec<Command>,
    /// `> solicitar` orders.
    pub exams: Vec<Command>,
    /// `> encaminhar` orders.
    pub referrals: Vec<Command>,
    /// Medication adjustments (`+`, `-`, `!`, `++`, `--`) within the
    /// configured [`AdjustmentScope`].
    pub medication_adjustments: Vec<Command>,
    /// `>` lines whose keyword was not recognised, verbatim.
    pub unrecognized: Vec<String>,
}

impl NoteAnalysis {
    /// Iterates over every extracted command, orders first.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.prescriptions
            .iter()
            .chain(&self.exams)
            .chain(&self.referrals)
            .chain(&self.medication_adjustments)
    }

    fn record(&mut self, command: Command) {
        match command {
            Command::Prescription { .. } => self.prescriptions.push(command),
            Command::Exam { .. } => self.exams.push(command),
            Command::Referral { .. } => self.referrals.push(command),
            Command::Unrecognized { raw } => self.unrecognized.push(raw),
            Command::AddMedication { .. }
            | Command::RemoveMedication { .. }
            | Command::ChangeMedication { .. }
            | Command::IncreaseDose { .. }
            | Command::DecreaseDose { .. } => self.medication_adjustments.push(command),
        }
    }
}

/// Analyses a note in a single pass.
///
/// The note is parsed into sections and persistent items, and every command
/// sigil line (`>`, `+`, `-`, `!`, `++`, `--`; not `!!` declarations) is
/// interpreted with `default_date` as its default date. Orders are collected
/// wherever they appear. Medication adjustments are collected only within
/// [`Config::adjustment_scope`].
///
/// ```
/// use prontuario::Config;
///
/// let note = "[ANAMNESE]\n+Dipirona\n[CONDUTA]\n-Dipirona\n> solicitar Hemograma";
/// let analysis = prontuario::analyze(note, "01/01/2024", &Config::default());
///
/// assert_eq!(analysis.exams.len(), 1);
/// assert_eq!(analysis.medication_adjustments.len(), 1);
/// ```
#[must_use]
#[instrument(level = "debug", skip(text, config), fields(bytes = text.len()))]
pub fn analyze(text: &str, default_date: &str, config: &Config) -> NoteAnalysis {
    let mut parser = SectionParser::new();
    let mut analysis = NoteAnalysis::default();
    let mut seen_conduta = false;

    for scanned in scan(text) {
        parser.feed(&scanned);
        seen_conduta |= scanned.section == Some(Section::Conduta);

        let Some((sigil, _)) = Sigil::detect(scanned.text) else {
            continue;
        };
        if !sigil.is_command() {
            continue;
        }
        if sigil.is_medication_adjustment()
            && !in_scope(config.adjustment_scope, scanned.section, seen_conduta)
        {
            tracing::debug!(line = scanned.text, "medication adjustment outside scope");
            continue;
        }

        analysis.record(interpret(scanned.text, default_date));
    }

    let ParsedNote {
        sections,
        persistent_items,
    } = parser.finish();
    analysis.sections = sections;
    analysis.persistent_items = persistent_items;

    tracing::debug!(
        prescriptions = analysis.prescriptions.len(),
        exams = analysis.exams.len(),
        referrals = analysis.referrals.len(),
        adjustments = analysis.medication_adjustments.len(),
        unrecognized = analysis.unrecognized.len(),
        "analysed note"
    );
    analysis
}

const fn in_scope(scope: AdjustmentScope, section: Option<Section>, seen_conduta: bool) -> bool {
    match scope {
        AdjustmentScope::CondutaSection => matches!(section, Some(Section::Conduta)),
        AdjustmentScope::AfterCondutaHeader => seen_conduta,
        AdjustmentScope::Anywhere => true,
    }
}

/// Counts the commands of each kind in an analysis.
#[must_use]
pub fn count_by_kind(analysis: &NoteAnalysis) -> Vec<(CommandKind, usize)> {
    let mut counts: Vec<(CommandKind, usize)> = Vec::new();
    for kind in analysis.commands().map(Command::kind) {
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }
    if !analysis.unrecognized.is_empty() {
        counts.push((CommandKind::Unrecognized, analysis.unrecognized.len()));
    }
    counts.sort_unstable();
    counts
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{Category, Entry};

    const TODAY: &str = "01/01/2024";

    const NOTE: &str = "\
+Ibuprofeno
[ANAMNESE]
Dor torácica há 2 dias.
-Dipirona
[CONDUTA]
!!MED Losartana 50mg[01/01/2020]
!Losartana > Enalapril [15/03/2024]
++Metformina
> prescrever Amoxicilina 500mg 8/8h 7 dias
> solicitar ECG
> encaminhar para Cardiologia
> agendar retorno
[HIPOTESE DIAGNOSTICA]
--Insulina
";

    fn analyze_with(scope: AdjustmentScope) -> NoteAnalysis {
        let config = Config {
            adjustment_scope: scope,
            ..Config::default()
        };
        analyze(NOTE, TODAY, &config)
    }

    #[test]
    fn collects_orders_and_adjustments() {
        let analysis = analyze_with(AdjustmentScope::CondutaSection);

        assert_eq!(
            analysis.prescriptions,
            vec![interpret("> prescrever Amoxicilina 500mg 8/8h 7 dias", TODAY)]
        );
        assert_eq!(
            analysis.exams,
            vec![Command::Exam {
                exam: "ECG".to_string(),
                date: TODAY.to_string(),
            }]
        );
        assert_eq!(
            analysis.referrals,
            vec![Command::Referral {
                specialty: "Cardiologia".to_string(),
                date: TODAY.to_string(),
            }]
        );
        assert_eq!(
            analysis.medication_adjustments,
            vec![
                Command::ChangeMedication {
                    from_medication: Some("Losartana".to_string()),
                    to_medication: Some("Enalapril".to_string()),
                    date: "15/03/2024".to_string(),
                },
                Command::IncreaseDose {
                    medication: "Metformina".to_string(),
                    date: TODAY.to_string(),
                },
            ]
        );
        assert_eq!(analysis.unrecognized, vec!["> agendar retorno".to_string()]);
    }

    #[test]
    fn sections_match_parse() {
        let analysis = analyze_with(AdjustmentScope::Anywhere);
        let parsed = crate::markup::parse(NOTE);

        assert_eq!(analysis.sections, parsed.sections);
        assert_eq!(analysis.persistent_items, parsed.persistent_items);
    }

    #[test]
    fn action_line_is_also_a_command() {
        let analysis = analyze_with(AdjustmentScope::CondutaSection);

        assert!(
            analysis
                .sections
                .get(Section::Conduta)
                .contains(&Entry::ActionItem("++Metformina".to_string()))
        );
        assert!(
            analysis
                .medication_adjustments
                .iter()
                .any(|c| c.kind() == CommandKind::IncreaseDose)
        );
    }

    #[test_case(AdjustmentScope::CondutaSection, 2; "inside conduta only")]
    #[test_case(AdjustmentScope::AfterCondutaHeader, 3; "after the first conduta header")]
    #[test_case(AdjustmentScope::Anywhere, 5; "whole note")]
    fn adjustment_scope(scope: AdjustmentScope, expected: usize) {
        assert_eq!(analyze_with(scope).medication_adjustments.len(), expected);
    }

    #[test]
    fn repeated_line_is_scoped_by_position() {
        let note = "[ANAMNESE]\n-Dipirona\n[CONDUTA]\n-Dipirona\n[ANAMNESE]\n-Dipirona";

        let analysis = analyze(note, TODAY, &Config::default());

        assert_eq!(
            analysis.medication_adjustments,
            vec![Command::RemoveMedication {
                medication: "Dipirona".to_string(),
                date: TODAY.to_string(),
            }]
        );
    }

    #[test]
    fn orders_outside_sections_are_collected() {
        let analysis = analyze("> solicitar TSH\n!!HPP Hipotireoidismo", TODAY, &Config::default());

        assert_eq!(analysis.exams.len(), 1);
        assert!(analysis.sections.is_empty());
        assert_eq!(analysis.persistent_items[0].category, Category::Hpp);
    }

    #[test]
    fn declarations_are_not_commands() {
        let analysis = analyze("[CONDUTA]\n!!MED Dipirona", TODAY, &Config::default());

        assert!(analysis.medication_adjustments.is_empty());
        assert!(analysis.unrecognized.is_empty());
    }

    #[test]
    fn counts_commands_by_kind() {
        let counts = count_by_kind(&analyze_with(AdjustmentScope::Anywhere));

        assert_eq!(
            counts,
            vec![
                (CommandKind::Prescription, 1),
                (CommandKind::Exam, 1),
                (CommandKind::Referral, 1),
                (CommandKind::AddMedication, 1),
                (CommandKind::RemoveMedication, 1),
                (CommandKind::ChangeMedication, 1),
                (CommandKind::IncreaseDose, 1),
                (CommandKind::DecreaseDose, 1),
                (CommandKind::Unrecognized, 1),
            ]
        );
    }
}
