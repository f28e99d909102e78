//! MODS to ExtractedItem translator
//!
//! Pulls the inventory fields out of a matched LibraryCloud record.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::matcher::container_location;
use super::parser::ModsRecord;
use crate::models::item::{CreatorColumn, CreatorsByRole, ExtractedItem, ItemFormat};

static ITEM_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"AWM\s+[A-Z]+\s+[0-9]+").unwrap());
static FINDING_AID_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"mus\d+").unwrap());

/// Separator between the title, subtitle and part number
const TITLE_SEPARATOR: &str = ": ";
/// Separator between a name and its unmapped role
const UNMAPPED_ROLE_SEPARATOR: &str = " – ";

/// A source for a field value; `None` passes to the next source
type Source = fn(&ModsRecord) -> Option<String>;

/// Where an item label may be read from, in order of preference
const LABEL_SOURCES: [Source; 2] = [shelf_locator, container_label];

/// Where a finding aid may be read from, in order of preference
const FINDING_AID_SOURCES: [Source; 2] = [record_finding_aid, related_finding_aid];

fn first_of(record: &ModsRecord, sources: &[Source]) -> Option<String> {
    sources.iter().find_map(|source| source(record))
}

/// MODS record translator
pub struct MetadataExtractor {
    hollis_source: String,
}

impl MetadataExtractor {
    /// `hollis_source` is the `recordIdentifier@source` value of HOLLIS numbers
    pub fn new(hollis_source: impl Into<String>) -> Self {
        Self {
            hollis_source: hollis_source.into(),
        }
    }

    /// Translate a record, or `None` when no AWM item label can be found
    pub fn extract(&self, record: &ModsRecord) -> Option<ExtractedItem> {
        let item_label = item_label(record)?;

        Some(ExtractedItem {
            format: ItemFormat::from_item_label(&item_label),
            hollis_number: self.hollis_number(record),
            finding_aid: finding_aid(record),
            full_title: full_title(record),
            date_issued: record.text_at(&["originInfo", "dateIssued"]),
            publisher: record.text_at(&["originInfo", "publisher"]),
            genres: record
                .children("genre")
                .filter_map(|g| g.non_empty_text())
                .map(String::from)
                .collect(),
            creators_by_role: creators_by_role(record),
            table_of_contents: table_of_contents(record),
            item_label,
        })
    }

    fn hollis_number(&self, record: &ModsRecord) -> String {
        record
            .find_path_all(&["recordInfo", "recordIdentifier"])
            .into_iter()
            .find(|el| el.attr("source") == Some(self.hollis_source.as_str()))
            .map(|el| el.text().to_string())
            .unwrap_or_default()
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new("MH:ALMA")
    }
}

fn shelf_locator(record: &ModsRecord) -> Option<String> {
    record
        .find_descendant("shelfLocator")
        .and_then(|el| el.non_empty_text())
        .map(String::from)
}

fn container_label(record: &ModsRecord) -> Option<String> {
    Some(container_location(record)).filter(|text| !text.is_empty())
}

/// Short call number such as `AWM LP 2078`
pub fn item_label(record: &ModsRecord) -> Option<String> {
    first_of(record, &LABEL_SOURCES).and_then(|raw| clean_item_label(&raw))
}

/// Cut `AWM <LETTERS> <DIGITS>` out of free shelf text
pub fn clean_item_label(raw: &str) -> Option<String> {
    ITEM_LABEL
        .find(&raw.to_uppercase())
        .map(|m| m.as_str().to_string())
}

/// Attribute-less record identifier, cut before its component suffix
/// (`mus00123c45` is component 45 of finding aid `mus00123`)
fn record_finding_aid(record: &ModsRecord) -> Option<String> {
    let record_info = record.find_descendant("recordInfo")?;
    record_info
        .children_named("recordIdentifier")
        .filter(|el| !el.has_attributes())
        .find_map(|el| el.non_empty_text())
        .map(|id| id.split('c').next().unwrap_or(id).to_string())
}

/// `mus` identifier from the URL of a related finding aid
fn related_finding_aid(record: &ModsRecord) -> Option<String> {
    record
        .descendants("relatedItem")
        .into_iter()
        .filter(|el| el.attr("otherType") == Some("Finding Aid"))
        .filter_map(|el| el.descendants_named("url").into_iter().next())
        .filter_map(|url| url.non_empty_text())
        .find_map(|url| {
            FINDING_AID_ID
                .find(&url.to_lowercase())
                .map(|m| m.as_str().to_string())
        })
}

pub fn finding_aid(record: &ModsRecord) -> String {
    first_of(record, &FINDING_AID_SOURCES).unwrap_or_default()
}

/// `title[: subTitle][: partNumber]`
pub fn full_title(record: &ModsRecord) -> String {
    let title = record.text_at(&["titleInfo", "title"]);
    let subtitle = record.text_at(&["titleInfo", "subTitle"]);
    let part_number = record.text_at(&["titleInfo", "partNumber"]);

    let mut full = title;
    for part in [subtitle, part_number] {
        if !part.is_empty() {
            full.push_str(TITLE_SEPARATOR);
            full.push_str(&part);
        }
    }
    full
}

/// Role term as used for column lookup: trailing periods dropped, title-cased
pub fn normalize_role(raw: &str) -> String {
    title_case(raw.trim().trim_end_matches('.'))
}

/// Upper-case the first letter of each word, lower-case the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

/// Group personal and corporate names into inventory columns.
///
/// A personal name is added once per role it declares, so a name with two
/// roles can land in two columns. Unmapped roles go to the fallback column
/// as `"<name> – <role>"`; a role that normalizes to nothing (`"."`) puts
/// the bare name there.
pub fn creators_by_role(record: &ModsRecord) -> CreatorsByRole {
    let mut result: CreatorsByRole = IndexMap::new();

    for name in record
        .children("name")
        .filter(|el| el.attr("type") == Some("personal"))
    {
        let full_name = name
            .children_named("namePart")
            .filter_map(|part| part.non_empty_text())
            .collect::<Vec<_>>()
            .join(", ");
        if full_name.is_empty() {
            continue;
        }

        let roles: Vec<String> = name
            .find_path_all(&["role", "roleTerm"])
            .into_iter()
            .filter(|term| term.attr("type") == Some("text"))
            .filter_map(|term| term.non_empty_text())
            .map(normalize_role)
            .collect();

        if roles.is_empty() {
            push_name(&mut result, CreatorColumn::FALLBACK, full_name.clone());
            continue;
        }

        for role in &roles {
            match CreatorColumn::from_role(role) {
                Some(column) => push_name(&mut result, column, full_name.clone()),
                None if role.is_empty() => {
                    push_name(&mut result, CreatorColumn::FALLBACK, full_name.clone())
                }
                None => push_name(
                    &mut result,
                    CreatorColumn::FALLBACK,
                    format!("{}{}{}", full_name, UNMAPPED_ROLE_SEPARATOR, role),
                ),
            }
        }
    }

    for corporate in record
        .children("name")
        .filter(|el| el.attr("type") == Some("corporate"))
    {
        if let Some(name) = corporate.child("namePart").and_then(|part| part.non_empty_text()) {
            push_name(&mut result, CreatorColumn::FALLBACK, name.to_string());
        }
    }

    result
}

fn push_name(result: &mut CreatorsByRole, column: CreatorColumn, name: String) {
    result.entry(column).or_default().push(name);
}

/// Every table of contents, one per line; `None` when there is none
pub fn table_of_contents(record: &ModsRecord) -> Option<String> {
    let entries: Vec<&str> = record
        .descendants("tableOfContents")
        .into_iter()
        .filter_map(|el| el.non_empty_text())
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries.join("\n"))
    }
}
