//! Batch order pipeline
//!
//! Call-number terms are resolved against the catalog one at a time, matched
//! records are translated into inventory rows, and the batch name is derived
//! once every row is known.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::{
    config::BatchConfig,
    error::{AppError, AppResult},
    models::{
        batch_name, BatchMetadata, BatchSetup, CallNumberTerm, DeliveryOptions, InventoryRow,
        RowDefaults,
    },
    mods::{match_records, MetadataExtractor, ModsRecord},
    services::{catalog::CatalogClient, sink::TabularSink, toc::TocIndex},
};

/// Records matched across all terms
#[derive(Debug, Default)]
pub struct MatchReport {
    pub records: Vec<ModsRecord>,
    /// Terms skipped after a catalog failure
    pub failed_terms: Vec<CallNumberTerm>,
}

/// Result of writing the matched records to a sink
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub metadata: BatchMetadata,
    pub rows_written: usize,
    /// Matched records without a usable item label
    pub discarded_records: usize,
    pub failed_terms: Vec<CallNumberTerm>,
    #[serde(skip)]
    pub toc: TocIndex,
}

pub struct BatchService<C> {
    catalog: C,
    extractor: MetadataExtractor,
    due_in_days: i64,
}

impl<C: CatalogClient> BatchService<C> {
    pub fn new(catalog: C, config: &BatchConfig) -> Self {
        Self {
            catalog,
            extractor: MetadataExtractor::new(config.hollis_source.clone()),
            due_in_days: config.due_in_days,
        }
    }

    /// Due date of the digitization order
    pub fn due_date(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(self.due_in_days)
    }

    /// Query the catalog for each term in turn and keep the records that carry it.
    ///
    /// A catalog failure only skips its term. Fails with
    /// [`AppError::NoMatches`] when nothing matched at all.
    pub async fn find_records(&self, terms: &[CallNumberTerm]) -> AppResult<MatchReport> {
        tracing::info!("Catalog search started for {} call number(s)", terms.len());
        let mut report = MatchReport::default();

        for (idx, term) in terms.iter().enumerate() {
            tracing::debug!("Querying term {}/{}: {}", idx + 1, terms.len(), term);

            match self.catalog.query(term).await {
                Ok(candidates) => {
                    let returned = candidates.len();
                    let matched = match_records(term, candidates);
                    tracing::debug!(
                        "Term {} matched {} of {} returned records",
                        term,
                        matched.len(),
                        returned
                    );
                    report.records.extend(matched);
                }
                Err(e) if e.is_transport() => {
                    tracing::warn!("Error fetching data for term {}: {}", term, e);
                    report.failed_terms.push(term.clone());
                }
                Err(e) => return Err(e),
            }
        }

        if report.records.is_empty() {
            tracing::warn!("No matching records found for the given call numbers");
            return Err(AppError::NoMatches);
        }

        tracing::info!(
            "Catalog search complete: {} matching record(s), {} term(s) skipped",
            report.records.len(),
            report.failed_terms.len()
        );
        Ok(report)
    }

    /// Translate matched records into rows, then write the batch metadata
    pub fn write_batch(
        &self,
        report: MatchReport,
        setup: &BatchSetup,
        delivery: &DeliveryOptions,
        today: NaiveDate,
        sink: &mut dyn TabularSink,
    ) -> AppResult<BatchOutcome> {
        let defaults = delivery.row_defaults(setup.access_level, self.due_date(today));

        let mut labels = Vec::new();
        let mut toc = TocIndex::new();
        let mut discarded_records = 0;

        for record in &report.records {
            match self.write_record(record, &defaults, sink)? {
                Some((label, contents)) => {
                    toc.insert(&label, contents);
                    labels.push(label);
                }
                None => discarded_records += 1,
            }
        }

        let name = batch_name(
            labels.iter().map(String::as_str),
            setup.order_type,
            setup.collection,
            today,
        );
        let metadata = BatchMetadata::new(setup, name, today);
        sink.write_batch_metadata(&metadata)?;

        tracing::info!(
            "Batch {} written: {} row(s), {} record(s) without item label",
            metadata.batch_name,
            labels.len(),
            discarded_records
        );

        Ok(BatchOutcome {
            metadata,
            rows_written: labels.len(),
            discarded_records,
            failed_terms: report.failed_terms,
            toc,
        })
    }

    /// Write one record's row; returns its label and table of contents
    fn write_record(
        &self,
        record: &ModsRecord,
        defaults: &RowDefaults,
        sink: &mut dyn TabularSink,
    ) -> AppResult<Option<(String, Option<String>)>> {
        let Some(item) = self.extractor.extract(record) else {
            tracing::debug!("Skipping record without an AWM item label");
            return Ok(None);
        };

        sink.write_row(&InventoryRow::new(&item, defaults))?;
        tracing::debug!("Wrote row for {} ({})", item.item_label, item.format.as_str());
        Ok(Some((item.item_label, item.table_of_contents)))
    }

    /// Resolve `terms` and write the whole batch in one go
    pub async fn run(
        &self,
        terms: &[CallNumberTerm],
        setup: &BatchSetup,
        delivery: &DeliveryOptions,
        today: NaiveDate,
        sink: &mut dyn TabularSink,
    ) -> AppResult<BatchOutcome> {
        let report = self.find_records(terms).await?;
        self.write_batch(report, setup, delivery, today, sink)
    }
}
