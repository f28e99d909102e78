//! Tabular output for the batch order paperwork

use std::path::{Path, PathBuf};

use crate::{
    error::AppResult,
    models::{BatchMetadata, InventoryRow},
};

/// Receives inventory rows as they are produced, then the batch metadata once
pub trait TabularSink {
    fn write_row(&mut self, row: &InventoryRow) -> AppResult<()>;

    fn write_batch_metadata(&mut self, metadata: &BatchMetadata) -> AppResult<()>;
}

/// Keeps everything in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<InventoryRow>,
    pub metadata: Option<BatchMetadata>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TabularSink for MemorySink {
    fn write_row(&mut self, row: &InventoryRow) -> AppResult<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn write_batch_metadata(&mut self, metadata: &BatchMetadata) -> AppResult<()> {
        self.metadata = Some(metadata.clone());
        Ok(())
    }
}

/// Writes `<batch name>.csv` (inventory) and `<batch name>_metadata.csv`.
///
/// The file names depend on the batch name, which is only known once every
/// row has been produced, so rows are held until the metadata arrives.
#[derive(Debug)]
pub struct CsvWorkbookSink {
    output_dir: PathBuf,
    pending: Vec<InventoryRow>,
    written: Vec<PathBuf>,
}

impl CsvWorkbookSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pending: Vec::new(),
            written: Vec::new(),
        }
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_inventory(&self, path: &Path) -> AppResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(InventoryRow::headers())?;
        for row in &self.pending {
            writer.write_record(row.to_record())?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_metadata(path: &Path, metadata: &BatchMetadata) -> AppResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["Field", "Value"])?;
        for (field, value) in metadata.fields() {
            writer.write_record([field, value.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl TabularSink for CsvWorkbookSink {
    fn write_row(&mut self, row: &InventoryRow) -> AppResult<()> {
        self.pending.push(row.clone());
        Ok(())
    }

    fn write_batch_metadata(&mut self, metadata: &BatchMetadata) -> AppResult<()> {
        std::fs::create_dir_all(&self.output_dir)?;

        let inventory_path = self.output_dir.join(format!("{}.csv", metadata.batch_name));
        self.write_inventory(&inventory_path)?;
        tracing::info!(
            "Wrote {} inventory row(s) to {}",
            self.pending.len(),
            inventory_path.display()
        );

        let metadata_path = self
            .output_dir
            .join(format!("{}_metadata.csv", metadata.batch_name));
        Self::write_metadata(&metadata_path, metadata)?;
        tracing::info!("Wrote batch metadata to {}", metadata_path.display());

        self.written.push(inventory_path);
        self.written.push(metadata_path);
        Ok(())
    }
}
