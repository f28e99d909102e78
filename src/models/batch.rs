//! Batch naming and batch-level metadata

use chrono::NaiveDate;
use serde::Serialize;

use super::enums::{
    AccessLevel, Collection, Curator, DownloadRestriction, Downloadable, OrderType, StorageClass,
};
use super::item::RowDefaults;

pub const BATCH_NAME_PREFIX: &str = "hcl-aps_batch_dropoff_";
pub const PATRON_REQUESTS_MARKER: &str = "Requests_";

/// A label that splits into exactly `PREFIX TYPE NUMBER`
#[derive(Debug, Clone, PartialEq, Eq)]
struct RangeEntry<'a> {
    prefix: &'a str,
    kind: &'a str,
    number_text: &'a str,
    /// `number_text` without leading zeros
    magnitude: &'a str,
}

impl<'a> RangeEntry<'a> {
    fn parse(label: &'a str) -> Option<Self> {
        let mut parts = label.split_whitespace();
        let (prefix, kind, number_text) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        if number_text.is_empty() || !number_text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            prefix,
            kind,
            number_text,
            magnitude: number_text.trim_start_matches('0'),
        })
    }

    /// Numeric order for digit strings of any length
    fn sort_key(&self) -> (usize, &'a str) {
        (self.magnitude.len(), self.magnitude)
    }
}

/// Call-number span covered by a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallNumberSpan {
    pub prefix: String,
    pub first_type: String,
    pub first_number: String,
    pub last_type: String,
    pub last_number: String,
    pub single: bool,
}

impl CallNumberSpan {
    /// Span of every label shaped `PREFIX TYPE NUMBER`; other labels are
    /// ignored. `None` when no label qualifies.
    pub fn from_labels<'a, I>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries: Vec<RangeEntry> = labels.into_iter().filter_map(RangeEntry::parse).collect();
        entries.sort_by_key(RangeEntry::sort_key);

        let first = entries.first()?;
        let last = entries.last()?;
        Some(Self {
            prefix: first.prefix.to_string(),
            first_type: first.kind.to_string(),
            first_number: first.number_text.to_string(),
            last_type: last.kind.to_string(),
            last_number: last.number_text.to_string(),
            single: entries.len() == 1,
        })
    }

    /// `AWM_LP_2078_`, `AWM_LP_2000_2010_` or `AWM_SC_10_LP_2001_`
    pub fn render(&self) -> String {
        if self.single {
            format!("{}_{}_{}_", self.prefix, self.first_type, self.first_number)
        } else if self.first_type == self.last_type {
            format!(
                "{}_{}_{}_{}_",
                self.prefix, self.first_type, self.first_number, self.last_number
            )
        } else {
            format!(
                "{}_{}_{}_{}_{}_",
                self.prefix, self.first_type, self.first_number, self.last_type, self.last_number
            )
        }
    }
}

/// Everything that goes into a batch name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchDescriptor {
    pub span: Option<CallNumberSpan>,
    pub order_type: OrderType,
    pub date: NaiveDate,
    pub initials: String,
}

impl BatchDescriptor {
    pub fn new<'a, I>(labels: I, order_type: OrderType, collection: Collection, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            span: CallNumberSpan::from_labels(labels),
            order_type,
            date,
            initials: collection.curator_initials().to_string(),
        }
    }

    pub fn name(&self) -> String {
        let mut name = String::from(BATCH_NAME_PREFIX);
        if self.order_type == OrderType::Patron {
            name.push_str(PATRON_REQUESTS_MARKER);
        }
        if let Some(span) = &self.span {
            name.push_str(&span.render());
        }
        name.push_str(&self.date.format("%Y%m%d").to_string());
        name.push_str(&self.initials);
        name
    }
}

/// Derive the batch name for a set of item labels
pub fn batch_name<'a, I>(labels: I, order_type: OrderType, collection: Collection, date: NaiveDate) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    BatchDescriptor::new(labels, order_type, collection, date).name()
}

/// Answers collected before the call numbers are entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSetup {
    pub collection: Collection,
    pub curator: Curator,
    pub order_type: OrderType,
    pub rush_deadline: Option<NaiveDate>,
    pub access_level: AccessLevel,
}

/// Answers collected once matching records have been found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOptions {
    pub downloadable: Downloadable,
    /// Only meaningful when `downloadable` is `No`
    pub download_restriction: Option<DownloadRestriction>,
    pub storage_class: StorageClass,
}

impl DeliveryOptions {
    pub fn row_defaults(&self, access_level: AccessLevel, due_date: NaiveDate) -> RowDefaults {
        RowDefaults {
            downloadable: self.downloadable,
            download_restriction: self.download_restriction,
            access_level,
            storage_class: self.storage_class,
            due_date: format_us_date(due_date),
        }
    }
}

/// `MM/DD/YYYY`, the date format of the paperwork
pub fn format_us_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Batch-level answers and derived values recorded alongside the inventory
#[derive(Debug, Clone, Serialize)]
pub struct BatchMetadata {
    pub batch_name: String,
    /// `MM/DD/YYYY`
    pub created_on: String,
    pub collection: Collection,
    pub curator: Curator,
    pub order_type: OrderType,
    /// `MM/DD/YYYY`, rush orders only
    pub rush_deadline: Option<String>,
    pub access_level: AccessLevel,
}

impl BatchMetadata {
    pub fn new(setup: &BatchSetup, batch_name: String, created_on: NaiveDate) -> Self {
        Self {
            batch_name,
            created_on: format_us_date(created_on),
            collection: setup.collection,
            curator: setup.curator,
            order_type: setup.order_type,
            rush_deadline: setup.rush_deadline.map(format_us_date),
            access_level: setup.access_level,
        }
    }

    /// Field/value pairs in the order of the batch metadata sheet
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Collection", self.collection.to_string()),
            ("Curator", self.curator.to_string()),
            ("Date", self.created_on.clone()),
            ("Copyright Permission Granted By", self.curator.to_string()),
            ("Order Type", self.order_type.to_string()),
            ("Rush Deadline", self.rush_deadline.clone().unwrap_or_default()),
            ("Access Flag", self.access_level.to_string()),
            ("Batch Name", self.batch_name.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn span(labels: &[&str]) -> String {
        CallNumberSpan::from_labels(labels.iter().copied())
            .map(|s| s.render())
            .unwrap_or_default()
    }

    #[test]
    fn test_single_item() {
        assert_eq!(span(&["AWM LP 2078"]), "AWM_LP_2078_");
    }

    #[test]
    fn test_same_type_range() {
        assert_eq!(
            span(&["AWM LP 2010", "AWM LP 2000", "AWM LP 2005"]),
            "AWM_LP_2000_2010_"
        );
    }

    #[test]
    fn test_mixed_types_use_sorted_extremes() {
        // SC 10 sorts before both LPs, so the extremes are SC 10 and LP 2001
        assert_eq!(
            span(&["AWM LP 2000", "AWM LP 2001", "AWM SC 10"]),
            "AWM_SC_10_LP_2001_"
        );
        assert_eq!(
            span(&["AWM SC 3000", "AWM LP 2000", "AWM LP 2001"]),
            "AWM_LP_2000_SC_3000_"
        );
    }

    #[test]
    fn test_unqualified_labels_are_skipped() {
        assert_eq!(span(&["AWM SPEC COLL 98", "AWM LP and", "AWM LP 7"]), "AWM_LP_7_");
        assert_eq!(span(&["AWM SPEC COLL 98"]), "");
        assert_eq!(span(&[]), "");
    }

    #[test]
    fn test_numbers_keep_their_spelling() {
        assert_eq!(span(&["AWM CD 0012", "AWM CD 3"]), "AWM_CD_3_0012_");
    }

    #[test]
    fn test_long_numbers_are_ordered() {
        assert_eq!(
            span(&["AWM LP 1234567890123456789012345", "AWM LP 99"]),
            "AWM_LP_99_1234567890123456789012345_"
        );
        assert_eq!(
            span(&["AWM LP 1234567890123456789012345"]),
            "AWM_LP_1234567890123456789012345_"
        );
        assert_eq!(span(&["AWM LP +5", "AWM LP 6"]), "AWM_LP_6_");
    }

    #[test]
    fn test_batch_name_standard_order() {
        let name = batch_name(["AWM LP 2078"], OrderType::Standard, Collection::Awm, day());
        assert_eq!(name, "hcl-aps_batch_dropoff_AWM_LP_2078_20261016EB");
    }

    #[test]
    fn test_batch_name_patron_order() {
        let name = batch_name(
            ["AWM SC 1", "AWM SC 4"],
            OrderType::Patron,
            Collection::Recco,
            day(),
        );
        assert_eq!(name, "hcl-aps_batch_dropoff_Requests_AWM_SC_1_4_20261016PL");
    }

    #[test]
    fn test_batch_name_without_range() {
        let name = batch_name(
            ["AWM SPEC COLL 98"],
            OrderType::Standard,
            Collection::Awm,
            day(),
        );
        assert_eq!(name, "hcl-aps_batch_dropoff_20261016EB");
    }

    #[test]
    fn test_metadata_from_setup() {
        let setup = BatchSetup {
            collection: Collection::Recco,
            curator: Curator::ElizabethBatiuk,
            order_type: OrderType::Patron,
            rush_deadline: NaiveDate::from_ymd_opt(2026, 11, 2),
            access_level: AccessLevel::NoAccess,
        };
        let metadata = BatchMetadata::new(&setup, "name".to_string(), day());
        assert_eq!(metadata.created_on, "10/16/2026");
        assert_eq!(metadata.rush_deadline.as_deref(), Some("11/02/2026"));
        assert_eq!(metadata.access_level, AccessLevel::NoAccess);
    }

    #[test]
    fn test_row_defaults_due_date() {
        let delivery = DeliveryOptions {
            downloadable: Downloadable::Yes,
            download_restriction: None,
            storage_class: StorageClass::Archival,
        };
        let defaults = delivery.row_defaults(AccessLevel::Public, day() + chrono::Duration::days(14));
        assert_eq!(defaults.due_date, "10/30/2026");
        assert_eq!(defaults.storage_class, StorageClass::Archival);
    }

    #[test]
    fn test_metadata_fields() {
        let metadata = BatchMetadata {
            batch_name: "hcl-aps_batch_dropoff_20261016EB".to_string(),
            created_on: "10/16/2026".to_string(),
            collection: Collection::Awm,
            curator: Curator::PeterLaurence,
            order_type: OrderType::Standard,
            rush_deadline: None,
            access_level: AccessLevel::Public,
        };
        let fields = metadata.fields();
        assert_eq!(fields[0], ("Collection", "AWM Collection".to_string()));
        assert_eq!(fields[3].1, "Peter Laurence");
        assert_eq!(fields[5].1, "");
        assert_eq!(fields.last().unwrap().1, "hcl-aps_batch_dropoff_20261016EB");
    }
}
