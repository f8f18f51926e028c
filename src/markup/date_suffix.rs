use std::sync::LazyLock;

use regex::Regex;

/// A trailing bracketed date, e.g. `Dipirona [10/05/2024]`.
///
/// The body is the longest prefix before a final bracket pair with no inner
/// brackets, so brackets inside the body are kept verbatim.
static TRAILING_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<body>.*?)\s*\[(?P<date>[^\[\]]+)\]$").expect("static regex must compile")
});

/// Splits a text into its body and optional trailing bracketed date.
///
/// Both parts are trimmed. The date is not validated.
pub(crate) fn split(text: &str) -> (&str, Option<&str>) {
    let text = text.trim();
    let Some(caps) = TRAILING_DATE.captures(text) else {
        return (text, None);
    };

    let date = caps.name("date").map_or("", |m| m.as_str().trim());
    if date.is_empty() {
        return (text, None);
    }

    let body = caps.name("body").map_or("", |m| m.as_str());
    (body.trim(), Some(date))
}
