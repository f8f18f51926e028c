use std::sync::LazyLock;

use regex::Regex;
use tracing::instrument;

use crate::{
    domain::Command,
    markup::{Sigil, date_suffix},
};

/// `<medication> <dosage> <interval> <duration>`, where the dosage is the
/// first word starting with a digit. The medication may be missing.
static PRESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<medication>.*?)(?:(?:^|\s+)(?P<dosage>\d\S*)(?:\s+(?P<interval>\S+))?(?:\s+(?P<duration>.+))?)?$",
    )
    .expect("static regex must compile")
});

/// `<from> > <to>`, split at the first `>`.
static CHANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<from>.+?)\s*>\s*(?P<to>.+)$").expect("static regex must compile")
});

/// Keywords of `>` orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Prescribe,
    Request,
    Refer,
}

/// Order keywords in the order they are tried. Matching ignores ASCII case.
const ORDER_KEYWORDS: [(&str, Order); 3] = [
    ("prescrever", Order::Prescribe),
    ("solicitar", Order::Request),
    ("encaminhar", Order::Refer),
];

/// Interprets one sigil line as a command.
///
/// Interpretation does not depend on which section the line is in. Any
/// trailing `[...]` on the line is taken as the command's date; otherwise
/// `default_date` is used.
///
/// Interpretation never fails:
/// - a line with a recognised sigil and keyword always yields that command,
///   with empty fields where the body did not match;
/// - a `>` line with an unknown keyword, a `!!` declaration, or a line with no
///   sigil yields [`Command::Unrecognized`].
///
/// ```
/// use prontuario::Command;
///
/// let command = prontuario::interpret("++Metformina", "01/01/2024");
///
/// assert_eq!(
///     command,
///     Command::IncreaseDose {
///         medication: "Metformina".to_string(),
///         date: "01/01/2024".to_string(),
///     }
/// );
/// ```
#[must_use]
#[instrument(level = "trace", skip(default_date))]
pub fn interpret(line: &str, default_date: &str) -> Command {
    let line = line.trim();
    let Some((sigil, rest)) = Sigil::detect(line) else {
        return unrecognized(line);
    };

    let (body, date) = date_suffix::split(rest);
    let date = date.unwrap_or(default_date).to_string();

    match sigil {
        Sigil::Order => order(line, body, date),
        Sigil::IncreaseDose => Command::IncreaseDose {
            medication: body.to_string(),
            date,
        },
        Sigil::DecreaseDose => Command::DecreaseDose {
            medication: body.to_string(),
            date,
        },
        Sigil::AddMedication => Command::AddMedication {
            medication: body.to_string(),
            date,
        },
        Sigil::RemoveMedication => Command::RemoveMedication {
            medication: body.to_string(),
            date,
        },
        Sigil::ChangeMedication => change(body, date),
        Sigil::Declaration => unrecognized(line),
    }
}

fn order(line: &str, body: &str, date: String) -> Command {
    let body = body.trim_start_matches('>').trim_start();

    let Some((order, rest)) = ORDER_KEYWORDS
        .iter()
        .find_map(|(keyword, order)| strip_prefix_ignore_case(body, keyword).map(|r| (*order, r)))
    else {
        return unrecognized(line);
    };
    let rest = rest.trim_start_matches(':').trim();

    match order {
        Order::Prescribe => prescription(rest, date),
        Order::Request => Command::Exam {
            exam: rest.to_string(),
            date,
        },
        Order::Refer => Command::Referral {
            specialty: strip_word_ignore_case(rest, "para")
                .unwrap_or(rest)
                .to_string(),
            date,
        },
    }
}

fn prescription(body: &str, date: String) -> Command {
    let caps = PRESCRIPTION.captures(body);
    let field = |name: &str| {
        caps.as_ref()
            .and_then(|caps| caps.name(name))
            .map_or_else(String::new, |m| m.as_str().to_string())
    };

    Command::Prescription {
        medication: field("medication"),
        dosage: field("dosage"),
        interval: field("interval"),
        duration: field("duration"),
        date,
    }
}

fn change(body: &str, date: String) -> Command {
    let names = CHANGE.captures(body).and_then(|caps| {
        let from = caps.name("from")?.as_str().to_string();
        let to = caps.name("to")?.as_str().to_string();
        Some((from, to))
    });

    if names.is_none() {
        tracing::debug!(body, "medication change without a '>' separator");
    }
    let (from_medication, to_medication) = names.unzip();

    Command::ChangeMedication {
        from_medication,
        to_medication,
        date,
    }
}

fn unrecognized(line: &str) -> Command {
    tracing::debug!(line, "unrecognized command");
    Command::Unrecognized {
        raw: line.to_string(),
    }
}

/// Strips `prefix` from the start of `text`, ignoring ASCII case.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

/// Strips a leading whole word, ignoring ASCII case. The word may be the
/// whole text.
fn strip_word_ignore_case<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = strip_prefix_ignore_case(text, word)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then(|| rest.trim_start())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    const TODAY: &str = "01/01/2024";

    #[test]
    fn prescription_fields() {
        assert_eq!(
            interpret("> prescrever Amoxicilina 500mg 8/8h 7 dias", TODAY),
            Command::Prescription {
                medication: "Amoxicilina".to_string(),
                dosage: "500mg".to_string(),
                interval: "8/8h".to_string(),
                duration: "7 dias".to_string(),
                date: TODAY.to_string(),
            }
        );
    }

    #[test]
    fn prescription_with_multi_word_medication_and_date() {
        assert_eq!(
            interpret(">PRESCREVER Vitamina B12 1000UI 1x/dia uso contínuo [02/03/2024]", TODAY),
            Command::Prescription {
                medication: "Vitamina B12".to_string(),
                dosage: "1000UI".to_string(),
                interval: "1x/dia".to_string(),
                duration: "uso contínuo".to_string(),
                date: "02/03/2024".to_string(),
            }
        );
    }

    #[test]
    fn prescription_with_missing_fields() {
        assert_eq!(
            interpret("> prescrever", TODAY),
            Command::Prescription {
                medication: String::new(),
                dosage: String::new(),
                interval: String::new(),
                duration: String::new(),
                date: TODAY.to_string(),
            }
        );

        let Command::Prescription {
            medication,
            dosage,
            interval,
            ..
        } = interpret("> prescrever Dipirona 500mg", TODAY)
        else {
            panic!("expected a prescription");
        };
        assert_eq!((medication.as_str(), dosage.as_str()), ("Dipirona", "500mg"));
        assert!(interval.is_empty());
    }

    #[test]
    fn prescription_without_medication_keeps_fields_in_place() {
        assert_eq!(
            interpret("> prescrever 500mg 8/8h 7 dias", TODAY),
            Command::Prescription {
                medication: String::new(),
                dosage: "500mg".to_string(),
                interval: "8/8h".to_string(),
                duration: "7 dias".to_string(),
                date: TODAY.to_string(),
            }
        );
    }

    #[test_case("> solicitar Hemograma completo", "Hemograma completo", TODAY)]
    #[test_case("> Solicitar: TSH [10/02/2024]", "TSH", "10/02/2024"; "colon and date")]
    #[test_case(">> solicitar RX de tórax", "RX de tórax", TODAY; "chained order sigil")]
    fn exam(line: &str, exam: &str, date: &str) {
        assert_eq!(
            interpret(line, TODAY),
            Command::Exam {
                exam: exam.to_string(),
                date: date.to_string(),
            }
        );
    }

    #[test_case("> encaminhar para Cardiologia", "Cardiologia")]
    #[test_case("> Encaminhar PARA  Endocrinologia", "Endocrinologia"; "upper case para")]
    #[test_case("> encaminhar Ortopedia", "Ortopedia"; "without para")]
    #[test_case("> encaminhar paraneurologia", "paraneurologia"; "para must be a word")]
    #[test_case("> encaminhar para", ""; "para without specialty")]
    #[test_case("> encaminhar", ""; "no specialty")]
    fn referral(line: &str, specialty: &str) {
        assert_eq!(
            interpret(line, TODAY),
            Command::Referral {
                specialty: specialty.to_string(),
                date: TODAY.to_string(),
            }
        );
    }

    #[test]
    fn change_medication() {
        assert_eq!(
            interpret("!Losartana > Enalapril [15/03/2024]", TODAY),
            Command::ChangeMedication {
                from_medication: Some("Losartana".to_string()),
                to_medication: Some("Enalapril".to_string()),
                date: "15/03/2024".to_string(),
            }
        );
    }

    #[test]
    fn change_medication_without_separator() {
        let command = interpret("!Losartana", TODAY);

        assert_eq!(
            command,
            Command::ChangeMedication {
                from_medication: None,
                to_medication: None,
                date: TODAY.to_string(),
            }
        );
        assert!(!command.is_complete());
    }

    #[test]
    fn increase_dose() {
        assert_eq!(
            interpret("++Metformina", TODAY),
            Command::IncreaseDose {
                medication: "Metformina".to_string(),
                date: TODAY.to_string(),
            }
        );
    }

    #[test_case("--Metformina 850mg", "Metformina 850mg")]
    #[test_case("-- Metformina [05/05/2024]", "Metformina"; "spaced with date")]
    fn decrease_dose(line: &str, medication: &str) {
        let Command::DecreaseDose { medication: actual, .. } = interpret(line, TODAY) else {
            panic!("expected a dose decrease");
        };
        assert_eq!(actual, medication);
    }

    #[test]
    fn add_and_remove() {
        assert_eq!(
            interpret("+ AAS 100mg", TODAY),
            Command::AddMedication {
                medication: "AAS 100mg".to_string(),
                date: TODAY.to_string(),
            }
        );
        assert_eq!(
            interpret("-Sinvastatina [20/04/2024]", TODAY),
            Command::RemoveMedication {
                medication: "Sinvastatina".to_string(),
                date: "20/04/2024".to_string(),
            }
        );
    }

    #[test_case("> desconhecido algo"; "unknown keyword")]
    #[test_case("!!MED Dipirona"; "declaration")]
    #[test_case("Paciente estável."; "no sigil")]
    fn unrecognized_lines(line: &str) {
        let command = interpret(line, TODAY);

        assert!(!command.is_recognized());
        assert_eq!(
            command,
            Command::Unrecognized {
                raw: line.to_string()
            }
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            interpret("   ++Metformina   ", TODAY),
            interpret("++Metformina", TODAY)
        );
    }

    #[test]
    fn keyword_prefix_does_not_split_on_char_boundary() {
        // The first ten bytes end inside a multi-byte character.
        let command = interpret("> prescreveé X", TODAY);
        assert!(!command.is_recognized());
    }
}
