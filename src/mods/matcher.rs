//! Call-number matching against catalog records
//!
//! LibraryCloud populates shelf locations and identifiers inconsistently, so
//! a record matches when every token of the term is found in either text.

use super::parser::ModsRecord;
use crate::models::CallNumberTerm;

/// Concatenated text of every `location/physicalLocation[@type="container"]`
pub fn container_location(record: &ModsRecord) -> String {
    record
        .find_path_all(&["location", "physicalLocation"])
        .into_iter()
        .filter(|el| el.attr("type") == Some("container"))
        .map(|el| el.text())
        .collect()
}

/// Container locations followed by the first shelf locator, upper-cased
pub fn shelf_text(record: &ModsRecord) -> String {
    let mut text = container_location(record);
    if let Some(shelf) = record.find_descendant("shelfLocator") {
        text.push_str(shelf.text());
    }
    text.to_uppercase()
}

/// Every identifier's text, space-joined and upper-cased
pub fn identifier_text(record: &ModsRecord) -> String {
    record
        .descendants("identifier")
        .into_iter()
        .filter_map(|el| el.non_empty_text())
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn contains_all(haystack: &str, tokens: &[String]) -> bool {
    tokens.iter().all(|token| haystack.contains(token.as_str()))
}

/// Whether `record` carries the call number `term`
pub fn is_match(term: &CallNumberTerm, record: &ModsRecord) -> bool {
    let tokens: Vec<String> = term.tokens().map(str::to_uppercase).collect();
    contains_all(&shelf_text(record), &tokens) || contains_all(&identifier_text(record), &tokens)
}

/// Records from `candidates` that carry `term`, in their original order
pub fn match_records(term: &CallNumberTerm, candidates: Vec<ModsRecord>) -> Vec<ModsRecord> {
    candidates
        .into_iter()
        .filter(|record| is_match(term, record))
        .collect()
}
