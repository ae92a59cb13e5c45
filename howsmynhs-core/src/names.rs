//! Canonical entity names.
//!
//! Source tables disagree on capitalisation ("luton and dunstable ..." in the
//! bed returns, "Luton And Dunstable ..." in A&E), so names are normalised
//! before any equality comparison.

use crate::{MetricTable, RowLabel};

const ACRONYM_AS_WORD: &str = "Nhs";
const ACRONYM: &str = "NHS";

/// Canonical form of one entity name.
///
/// Uppercases the first character of each space-separated word and leaves
/// the rest of the word untouched, joins words with single spaces, then
/// replaces every literal `Nhs` with `NHS`.
///
/// ```
/// use howsmynhs_core::normalize_name;
///
/// assert_eq!(
///     normalize_name("luton and dunstable university hospital nhs foundation trust"),
///     "Luton And Dunstable University Hospital NHS Foundation Trust",
/// );
/// assert_eq!(normalize_name("King's College Hospital NHS"), "King's College Hospital NHS");
/// ```
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split(' ').filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out.replace(ACRONYM_AS_WORD, ACRONYM)
}

/// Normalise a column of row labels. Metadata rows pass through unchanged.
///
/// Output has the same length and order as `raw`.
#[must_use]
pub fn normalize_names(raw: &[RowLabel]) -> Vec<RowLabel> {
    raw.iter().cloned().map(normalize_label).collect()
}

/// The table with every entity row label normalised.
#[must_use]
pub fn normalize_table(table: MetricTable) -> MetricTable {
    table.map_rows(normalize_label)
}

fn normalize_label(label: RowLabel) -> RowLabel {
    match label {
        RowLabel::Entity(name) => RowLabel::Entity(normalize_name(&name)),
        meta @ RowLabel::Metadata(_) => meta,
    }
}
