use crate::{
    domain::{PersistentItem, Section},
    markup::{
        declaration,
        sigil::{self, DECLARATION_PREFIX},
    },
};

/// A non-blank note line, classified by its shape alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// A section header such as `[CONDUTA]`.
    Header(Section),
    /// A `!!` declaration and the persistent items it declares.
    Declaration(Vec<PersistentItem>),
    /// A line starting with an action prefix (`!`, `+`, `--`, `>>`, `>`).
    Action(&'a str),
    /// Anything else.
    Text(&'a str),
}

/// A classified line together with the section open when it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    /// The open section. For a header line this is the section it opens.
    pub section: Option<Section>,
    /// The trimmed line.
    pub text: &'a str,
    /// The classification of the line.
    pub line: Line<'a>,
}

/// Iterator over the non-blank lines of a note, tracking the open section.
///
/// Created by [`scan`].
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    lines: std::str::Lines<'a>,
    section: Option<Section>,
}

/// Scans a note line by line.
///
/// Lines are trimmed and blank lines skipped. The open section starts as
/// `None` and changes only on header lines; blank lines never close it.
#[must_use]
pub fn scan(text: &str) -> Scanner<'_> {
    Scanner {
        lines: text.lines(),
        section: None,
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ScannedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.lines.by_ref().map(str::trim).find(|l| !l.is_empty())?;

        let line = classify(text);
        if let Line::Header(section) = &line {
            tracing::trace!(%section, "section opened");
            self.section = Some(*section);
        }

        Some(ScannedLine {
            section: self.section,
            text,
            line,
        })
    }
}

fn classify(text: &str) -> Line<'_> {
    if let Some(section) = Section::from_header(text) {
        Line::Header(section)
    } else if let Some(rest) = text.strip_prefix(DECLARATION_PREFIX) {
        Line::Declaration(declaration::parse(rest))
    } else if sigil::is_action(text) {
        Line::Action(text)
    } else {
        Line::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn tracks_open_section() {
        let note = "antes\n[ANAMNESE]\n  dor  \n\n[CONDUTA]\n+AAS\n[ANAMNESE]\nfebre";

        let scanned: Vec<_> = scan(note).map(|l| (l.section, l.text)).collect();

        assert_eq!(
            scanned,
            vec![
                (None, "antes"),
                (Some(Section::Anamnese), "[ANAMNESE]"),
                (Some(Section::Anamnese), "dor"),
                (Some(Section::Conduta), "[CONDUTA]"),
                (Some(Section::Conduta), "+AAS"),
                (Some(Section::Anamnese), "[ANAMNESE]"),
                (Some(Section::Anamnese), "febre"),
            ]
        );
    }

    #[test]
    fn unknown_header_keeps_section() {
        let lines: Vec<_> = scan("[CONDUTA]\n[PLANO]\nrepouso").collect();

        assert_eq!(lines[1].section, Some(Section::Conduta));
        assert_eq!(lines[1].line, Line::Text("[PLANO]"));
        assert_eq!(lines[2].section, Some(Section::Conduta));
    }

    #[test]
    fn classification_precedence() {
        let lines: Vec<_> = scan("!!HPP Asma\n!Losartana > Enalapril\n>> retorno\n-Dipirona")
            .map(|l| l.line)
            .collect();

        assert_eq!(
            lines,
            vec![
                Line::Declaration(vec![PersistentItem::new(Category::Hpp, "Asma", None)]),
                Line::Action("!Losartana > Enalapril"),
                Line::Action(">> retorno"),
                Line::Text("-Dipirona"),
            ]
        );
    }

    #[test]
    fn crlf_line_endings() {
        let lines: Vec<_> = scan("[ANAMNESE]\r\ndor\r\n").map(|l| l.text).collect();
        assert_eq!(lines, vec!["[ANAMNESE]", "dor"]);
    }
}
