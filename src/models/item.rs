//! Extracted audio items and the inventory rows built from them

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::enums::{AccessLevel, Choice, DownloadRestriction, Downloadable, StorageClass};

static SEVEN_INCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"AWM\s*45[-\s]?\d{4}").unwrap());

/// Carrier format derived from an item label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemFormat {
    #[serde(rename = "COMPACT CASSETTE")]
    CompactCassette,
    #[serde(rename = "1/4\" OPEN REEL AUDIO")]
    OpenReel,
    #[serde(rename = "DAT")]
    Dat,
    #[serde(rename = "COMPACT DISC")]
    CompactDisc,
    #[serde(rename = "DIGITAL AUDIO FILE")]
    DigitalAudioFile,
    #[serde(rename = "LP")]
    Lp,
    #[serde(rename = "")]
    Unknown,
}

impl ItemFormat {
    /// Classify a label by substring, first match wins.
    ///
    /// Labels routinely contain several markers ("LP" labels may also contain
    /// "ER"), so the check order is fixed.
    pub fn from_item_label(label: &str) -> Self {
        let label = label.to_uppercase();
        if label.contains("SC") {
            ItemFormat::CompactCassette
        } else if label.contains("RL") {
            ItemFormat::OpenReel
        } else if label.contains("DAT") {
            ItemFormat::Dat
        } else if label.contains("CD") {
            ItemFormat::CompactDisc
        } else if label.contains("ER") {
            ItemFormat::DigitalAudioFile
        } else if label.contains("LP") || SEVEN_INCH.is_match(&label) {
            ItemFormat::Lp
        } else {
            ItemFormat::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemFormat::CompactCassette => "COMPACT CASSETTE",
            ItemFormat::OpenReel => "1/4\" OPEN REEL AUDIO",
            ItemFormat::Dat => "DAT",
            ItemFormat::CompactDisc => "COMPACT DISC",
            ItemFormat::DigitalAudioFile => "DIGITAL AUDIO FILE",
            ItemFormat::Lp => "LP",
            ItemFormat::Unknown => "",
        }
    }
}

/// Inventory column receiving the names of one creator role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatorColumn {
    Actor,
    Adapter,
    Arranger,
    Author,
    Commentator,
    Composer,
    Creator,
    Director,
    Instrumentalist,
    Interviewee,
    Interviewer,
    Librettist,
    Lyricist,
    Moderator,
    MusicalDirector,
    Musician,
    Narrator,
    Performer,
    Publisher,
    RightsStatement,
    Singer,
    Speaker,
    Storyteller,
    Subject,
    Vocalist,
}

impl CreatorColumn {
    /// Column for names whose role is missing or not in the table
    pub const FALLBACK: CreatorColumn = CreatorColumn::Creator;

    pub const ALL: [CreatorColumn; 25] = [
        CreatorColumn::Actor,
        CreatorColumn::Adapter,
        CreatorColumn::Arranger,
        CreatorColumn::Author,
        CreatorColumn::Commentator,
        CreatorColumn::Composer,
        CreatorColumn::Creator,
        CreatorColumn::Director,
        CreatorColumn::Instrumentalist,
        CreatorColumn::Interviewee,
        CreatorColumn::Interviewer,
        CreatorColumn::Librettist,
        CreatorColumn::Lyricist,
        CreatorColumn::Moderator,
        CreatorColumn::MusicalDirector,
        CreatorColumn::Musician,
        CreatorColumn::Narrator,
        CreatorColumn::Performer,
        CreatorColumn::Publisher,
        CreatorColumn::RightsStatement,
        CreatorColumn::Singer,
        CreatorColumn::Speaker,
        CreatorColumn::Storyteller,
        CreatorColumn::Subject,
        CreatorColumn::Vocalist,
    ];

    /// Look up a title-cased role term ("Performer", "Musical Director")
    pub fn from_role(role: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|column| column.role() == role)
    }

    pub fn role(&self) -> &'static str {
        match self {
            CreatorColumn::Actor => "Actor",
            CreatorColumn::Adapter => "Adapter",
            CreatorColumn::Arranger => "Arranger",
            CreatorColumn::Author => "Author",
            CreatorColumn::Commentator => "Commentator",
            CreatorColumn::Composer => "Composer",
            CreatorColumn::Creator => "Creator",
            CreatorColumn::Director => "Director",
            CreatorColumn::Instrumentalist => "Instrumentalist",
            CreatorColumn::Interviewee => "Interviewee",
            CreatorColumn::Interviewer => "Interviewer",
            CreatorColumn::Librettist => "Librettist",
            CreatorColumn::Lyricist => "Lyricist",
            CreatorColumn::Moderator => "Moderator",
            CreatorColumn::MusicalDirector => "Musical Director",
            CreatorColumn::Musician => "Musician",
            CreatorColumn::Narrator => "Narrator",
            CreatorColumn::Performer => "Performer",
            CreatorColumn::Publisher => "Publisher",
            CreatorColumn::RightsStatement => "Rights Statement",
            CreatorColumn::Singer => "Singer",
            CreatorColumn::Speaker => "Speaker",
            CreatorColumn::Storyteller => "Storyteller",
            CreatorColumn::Subject => "Subject",
            CreatorColumn::Vocalist => "Vocalist",
        }
    }
}

/// Names per creator column, in document order, duplicates kept
pub type CreatorsByRole = IndexMap<CreatorColumn, Vec<String>>;

/// Descriptive metadata pulled from one matched MODS record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Short call number, e.g. `AWM LP 2078`
    pub item_label: String,
    pub format: ItemFormat,
    pub hollis_number: String,
    pub finding_aid: String,
    pub full_title: String,
    pub date_issued: String,
    pub publisher: String,
    pub genres: Vec<String>,
    pub creators_by_role: CreatorsByRole,
    pub table_of_contents: Option<String>,
}

impl ExtractedItem {
    /// Names of one column joined for a single cell
    pub fn creators(&self, column: CreatorColumn) -> String {
        self.creators_by_role
            .get(&column)
            .map(|names| names.join("; "))
            .unwrap_or_default()
    }

    pub fn genres_joined(&self) -> String {
        self.genres.join("; ")
    }
}

/// Batch-wide values copied onto every inventory row
#[derive(Debug, Clone, Serialize)]
pub struct RowDefaults {
    pub downloadable: Downloadable,
    pub download_restriction: Option<DownloadRestriction>,
    pub access_level: AccessLevel,
    pub storage_class: StorageClass,
    /// `MM/DD/YYYY`
    pub due_date: String,
}

/// One line of the audio digitization inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRow {
    pub item_label: String,
    pub format: String,
    pub hollis_number: String,
    pub finding_aid: String,
    pub download: String,
    pub download_restriction: String,
    pub access_flag: String,
    pub storage_class: String,
    pub title: String,
    pub creators: IndexMap<CreatorColumn, String>,
    pub date_issued: String,
    pub genres: String,
    pub publisher: String,
    pub due_date: String,
}

impl InventoryRow {
    pub fn new(item: &ExtractedItem, defaults: &RowDefaults) -> Self {
        let creators = item
            .creators_by_role
            .keys()
            .map(|column| (*column, item.creators(*column)))
            .collect();

        // The reason only applies when the batch is withheld from download
        let download_restriction = match (defaults.downloadable, defaults.download_restriction) {
            (Downloadable::No, Some(reason)) => reason.label().to_string(),
            _ => String::new(),
        };

        Self {
            item_label: item.item_label.clone(),
            format: item.format.as_str().to_string(),
            hollis_number: item.hollis_number.clone(),
            finding_aid: item.finding_aid.clone(),
            download: defaults.downloadable.label().to_string(),
            download_restriction,
            access_flag: defaults.access_level.label().to_string(),
            storage_class: defaults.storage_class.label().to_string(),
            title: item.full_title.clone(),
            creators,
            date_issued: item.date_issued.clone(),
            genres: item.genres_joined(),
            publisher: item.publisher.clone(),
            due_date: defaults.due_date.clone(),
        }
    }

    /// Header line matching [`InventoryRow::to_record`]
    pub fn headers() -> Vec<String> {
        let mut headers: Vec<String> = [
            "Item Label",
            "Format",
            "HOLLIS Number",
            "Finding Aid",
            "Download",
            "Download Restriction Reason",
            "Access Flag",
            "Storage Class",
            "Title",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect();
        headers.extend(CreatorColumn::ALL.iter().map(|c| c.role().to_string()));
        headers.extend(
            ["Date Issued", "Genre", "Publisher", "Due Date"]
                .iter()
                .map(|h| h.to_string()),
        );
        headers
    }

    /// Flatten into cells, one per header, empty creator columns included
    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.item_label.clone(),
            self.format.clone(),
            self.hollis_number.clone(),
            self.finding_aid.clone(),
            self.download.clone(),
            self.download_restriction.clone(),
            self.access_flag.clone(),
            self.storage_class.clone(),
            self.title.clone(),
        ];
        record.extend(
            CreatorColumn::ALL
                .iter()
                .map(|column| self.creators.get(column).cloned().unwrap_or_default()),
        );
        record.extend([
            self.date_issued.clone(),
            self.genres.clone(),
            self.publisher.clone(),
            self.due_date.clone(),
        ]);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str) -> ExtractedItem {
        ExtractedItem {
            item_label: label.to_string(),
            format: ItemFormat::from_item_label(label),
            hollis_number: "990012345670203941".to_string(),
            finding_aid: "mus00123".to_string(),
            full_title: "Songs: Volume one".to_string(),
            date_issued: "1962".to_string(),
            publisher: "Folkways".to_string(),
            genres: vec!["Folk music".to_string(), "Ballads".to_string()],
            creators_by_role: IndexMap::new(),
            table_of_contents: None,
        }
    }

    #[test]
    fn test_format_precedence() {
        assert_eq!(ItemFormat::from_item_label("AWM ER 100"), ItemFormat::DigitalAudioFile);
        assert_eq!(ItemFormat::from_item_label("AWM LPSC 1"), ItemFormat::CompactCassette);
        assert_eq!(ItemFormat::from_item_label("AWM SC 10"), ItemFormat::CompactCassette);
        assert_eq!(ItemFormat::from_item_label("AWM RL 3"), ItemFormat::OpenReel);
        assert_eq!(ItemFormat::from_item_label("AWM DAT 3"), ItemFormat::Dat);
        assert_eq!(ItemFormat::from_item_label("AWM CD 3"), ItemFormat::CompactDisc);
        assert_eq!(ItemFormat::from_item_label("awm lp 2078"), ItemFormat::Lp);
        assert_eq!(ItemFormat::from_item_label("AWM 45-1234"), ItemFormat::Lp);
        assert_eq!(ItemFormat::from_item_label("AWM X 1"), ItemFormat::Unknown);
        assert_eq!(ItemFormat::Unknown.as_str(), "");
    }

    #[test]
    fn test_role_lookup() {
        assert_eq!(CreatorColumn::from_role("Performer"), Some(CreatorColumn::Performer));
        assert_eq!(
            CreatorColumn::from_role("Musical Director"),
            Some(CreatorColumn::MusicalDirector)
        );
        assert_eq!(CreatorColumn::from_role("performer"), None);
        assert_eq!(CreatorColumn::from_role("Conductor"), None);
    }

    #[test]
    fn test_row_carries_batch_defaults() {
        let mut item = item("AWM LP 2078");
        item.creators_by_role.insert(
            CreatorColumn::Performer,
            vec!["Seeger, Pete".to_string(), "Seeger, Pete".to_string()],
        );
        let defaults = RowDefaults {
            downloadable: Downloadable::No,
            download_restriction: Some(DownloadRestriction::Copyright),
            access_level: AccessLevel::Restricted,
            storage_class: StorageClass::Basic,
            due_date: "10/30/2026".to_string(),
        };

        let row = InventoryRow::new(&item, &defaults);
        assert_eq!(row.format, "LP");
        assert_eq!(row.download, "FALSE");
        assert_eq!(row.download_restriction, "Copyright");
        assert_eq!(row.access_flag, "R");
        assert_eq!(row.genres, "Folk music; Ballads");
        assert_eq!(row.creators[&CreatorColumn::Performer], "Seeger, Pete; Seeger, Pete");

        let record = row.to_record();
        let headers = InventoryRow::headers();
        assert_eq!(record.len(), headers.len());
        let performer = headers.iter().position(|h| h == "Performer").unwrap();
        assert_eq!(record[performer], "Seeger, Pete; Seeger, Pete");
        let actor = headers.iter().position(|h| h == "Actor").unwrap();
        assert_eq!(record[actor], "");
        assert_eq!(record.last().unwrap(), "10/30/2026");
    }

    #[test]
    fn test_reason_dropped_when_downloadable() {
        let defaults = RowDefaults {
            downloadable: Downloadable::Yes,
            download_restriction: Some(DownloadRestriction::License),
            access_level: AccessLevel::Public,
            storage_class: StorageClass::Large,
            due_date: String::new(),
        };
        let row = InventoryRow::new(&item("AWM SC 1"), &defaults);
        assert_eq!(row.download_restriction, "");
        assert_eq!(row.download, "TRUE");
    }
}
