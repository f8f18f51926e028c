//! Persistent item declarations (`!!` lines).

use crate::{
    domain::{Category, PersistentItem},
    markup::date_suffix,
};

/// Categories declared as a `;`-separated list after their keyword.
const LIST_CATEGORIES: [Category; 2] = [Category::Med, Category::Hpp];

/// Parses the text following `!!` into persistent items.
///
/// - `MED a; b[dd/mm/yyyy]` yields one medication per entry, dated when the
///   entry ends in a bracketed date.
/// - `HPP a; b` yields one prior condition per entry, never dated.
/// - Anything else yields a single `INFO` item holding the whole text, which
///   is empty for a bare `!!`.
///
/// Empty list entries are dropped.
pub(crate) fn parse(rest: &str) -> Vec<PersistentItem> {
    let declaration = rest.trim();

    for category in LIST_CATEGORIES {
        let Some(list) = category
            .keyword()
            .and_then(|keyword| declaration.strip_prefix(keyword))
            .and_then(|rest| rest.strip_prefix(' '))
        else {
            continue;
        };

        return list
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| list_item(category, entry))
            .collect();
    }

    vec![PersistentItem::new(Category::Info, declaration, None)]
}

fn list_item(category: Category, entry: &str) -> PersistentItem {
    match category {
        Category::Med => match date_suffix::split(entry) {
            ("", _) | (_, None) => PersistentItem::new(category, entry, None),
            (name, Some(date)) => PersistentItem::new(category, name, Some(date.to_string())),
        },
        Category::Hpp | Category::Info => PersistentItem::new(category, entry, None),
    }
}
