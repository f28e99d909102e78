//! Table-of-contents collection and CSV export
//!
//! The track listing of each item feeds the separate Audio Playlist Track
//! Data workbook, so it is kept per item label and exported on request.

use indexmap::IndexMap;
use std::path::Path;

use crate::error::AppResult;

/// Preview length shown before the export prompt
const PREVIEW_CHARS: usize = 100;

/// Table of contents per item label, in processing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TocIndex {
    entries: IndexMap<String, Option<String>>,
}

impl TocIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the contents of an item; a later item with the same label wins
    pub fn insert(&mut self, item_label: &str, toc: Option<String>) {
        self.entries.insert(item_label.to_string(), toc);
    }

    /// Items with non-empty contents
    pub fn with_contents(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(label, toc)| {
            toc.as_deref()
                .filter(|t| !t.is_empty())
                .map(|t| (label.as_str(), t))
        })
    }

    pub fn has_contents(&self) -> bool {
        self.with_contents().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One line per item: `label: first 100 chars...`
    pub fn preview_lines(&self) -> Vec<String> {
        self.with_contents()
            .map(|(label, toc)| {
                let mut preview: String = toc.chars().take(PREVIEW_CHARS).collect();
                if toc.chars().count() > PREVIEW_CHARS {
                    preview.push_str("...");
                }
                format!("{}: {}", label, preview)
            })
            .collect()
    }

    /// Write `Item Label,Table of Contents` rows for items with contents.
    /// Returns the number of rows written.
    pub fn export_csv(&self, path: &Path) -> AppResult<usize> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["Item Label", "Table of Contents"])?;

        let mut rows = 0;
        for (label, toc) in self.with_contents() {
            writer.write_record([label, toc])?;
            rows += 1;
        }
        writer.flush()?;

        tracing::info!("Exported {} table(s) of contents to {}", rows, path.display());
        Ok(rows)
    }
}
