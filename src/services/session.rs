//! Interactive batch order session
//!
//! Questions are asked in the order the batch order paperwork is filled:
//! batch setup, call numbers, catalog search, delivery options, then the
//! optional table-of-contents export.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

use super::{
    batch::{BatchOutcome, BatchService},
    catalog::CatalogClient,
    prompt::{select, ChoiceProvider},
    sink::TabularSink,
    toc::TocIndex,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        normalize, AccessLevel, BatchSetup, CallNumberTerm, Collection, Curator, DeliveryOptions,
        DownloadRestriction, Downloadable, OrderType, StorageClass, YesNo,
    },
};

const CALL_NUMBER_QUESTION: &str = "Enter call number(s):\n\
    - Single (e.g. AWM LP 2030)\n\
    - Comma-separated (e.g. AWM LP 2030, AWM SC 1010)\n\
    - Range (e.g. AWM LP 2000–2010)\n\
    - Collection (e.g. AWM SPEC COLL 98)";

/// What a finished session produced
#[derive(Debug, Serialize)]
pub struct SessionOutcome {
    #[serde(flatten)]
    pub batch: BatchOutcome,
    pub setup: BatchSetup,
    pub delivery: DeliveryOptions,
    /// Set when the operator asked for the table-of-contents export
    pub toc_export: Option<PathBuf>,
}

/// Batch setup questions, asked before any call number
pub fn ask_setup<P: ChoiceProvider + ?Sized>(prompt: &mut P) -> AppResult<BatchSetup> {
    let collection: Collection = select(prompt, "What is the name of the collection?")?;
    let curator: Curator = select(prompt, "Who is the curator granting copy permission?")?;
    let order_type: OrderType = select(prompt, "What is the order type for this batch?")?;

    let rush: YesNo = select(prompt, "Is this a rush order?")?;
    let rush_deadline = if rush.is_yes() {
        Some(prompt.date("What is the deadline for delivering a rush order")?)
    } else {
        None
    };

    let access_level: AccessLevel = select(prompt, "What is the access level for this batch?")?;

    Ok(BatchSetup {
        collection,
        curator,
        order_type,
        rush_deadline,
        access_level,
    })
}

/// Ask for call numbers until the whole entry is valid.
///
/// A `preset` entry is used as-is; an invalid preset fails instead of
/// falling back to the prompt.
pub fn ask_call_numbers<P: ChoiceProvider + ?Sized>(
    prompt: &mut P,
    preset: Option<&str>,
) -> AppResult<Vec<CallNumberTerm>> {
    if let Some(raw) = preset {
        return normalize(raw);
    }

    loop {
        let raw = prompt.text(CALL_NUMBER_QUESTION)?;
        match normalize(&raw) {
            Ok(terms) => return Ok(terms),
            Err(AppError::InvalidSyntax(entry)) => {
                tracing::debug!("Rejected call number entry: {}", entry);
                prompt.notice("One or more call numbers are invalid. Please try again.\n")?;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Delivery questions, asked once matching records exist
pub fn ask_delivery<P: ChoiceProvider + ?Sized>(prompt: &mut P) -> AppResult<DeliveryOptions> {
    let downloadable: Downloadable = select(prompt, "Should this batch be available for download?")?;
    let download_restriction = match downloadable {
        Downloadable::No => Some(select::<DownloadRestriction, _>(
            prompt,
            "Why is this batch not available for download?",
        )?),
        Downloadable::Yes => None,
    };
    let storage_class: StorageClass =
        select(prompt, "What is the archival file storage class for this item?")?;

    Ok(DeliveryOptions {
        downloadable,
        download_restriction,
        storage_class,
    })
}

/// Preview the collected tables of contents and export them on request
pub fn offer_toc_export<P: ChoiceProvider + ?Sized>(
    prompt: &mut P,
    toc: &TocIndex,
    path: PathBuf,
) -> AppResult<Option<PathBuf>> {
    if toc.has_contents() {
        prompt.notice("The following items have a table of contents:")?;
        for line in toc.preview_lines() {
            prompt.notice(&line)?;
        }
    }

    let export: YesNo = select(
        prompt,
        "Would you like to view the table of contents for these items in order to \
         populate the Audio Playlist Track Data workbook?",
    )?;
    if !export.is_yes() {
        return Ok(None);
    }

    toc.export_csv(&path)?;
    prompt.notice(&format!("Table of contents saved to {}", path.display()))?;
    Ok(Some(path))
}

/// One complete batch order, from the first question to the written sink
pub struct OrderSession<C> {
    service: BatchService<C>,
    toc_export_path: PathBuf,
}

impl<C: CatalogClient> OrderSession<C> {
    pub fn new(service: BatchService<C>, toc_export_path: impl Into<PathBuf>) -> Self {
        Self {
            service,
            toc_export_path: toc_export_path.into(),
        }
    }

    pub async fn run<P: ChoiceProvider + ?Sized>(
        &self,
        prompt: &mut P,
        call_numbers: Option<&str>,
        today: NaiveDate,
        sink: &mut dyn TabularSink,
    ) -> AppResult<SessionOutcome> {
        let setup = ask_setup(prompt)?;
        tracing::debug!("Batch setup: {:?}", setup);

        let terms = ask_call_numbers(prompt, call_numbers)?;
        tracing::info!("Searching the catalog for {} call number(s)", terms.len());

        let report = match self.service.find_records(&terms).await {
            Ok(report) => report,
            Err(AppError::NoMatches) => {
                prompt.notice("No matching records found for the given call numbers.")?;
                return Err(AppError::NoMatches);
            }
            Err(e) => return Err(e),
        };
        for term in &report.failed_terms {
            prompt.notice(&format!("Error fetching data for term: {}", term))?;
        }

        let delivery = ask_delivery(prompt)?;
        let batch = self
            .service
            .write_batch(report, &setup, &delivery, today, sink)?;

        let toc_export = offer_toc_export(prompt, &batch.toc, self.toc_export_path.clone())?;

        Ok(SessionOutcome {
            batch,
            setup,
            delivery,
            toc_export,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BatchConfig;
    use crate::mods::ModsRecord;
    use crate::services::catalog::MockCatalogClient;
    use crate::services::prompt::ConsolePrompt;
    use crate::services::sink::MemorySink;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn record(shelf: &str, toc: &str) -> ModsRecord {
        ModsRecord::parse(&format!(
            r#"<mods xmlns="http://www.loc.gov/mods/v3">
                 <titleInfo><title>Item</title></titleInfo>
                 <location><shelfLocator>{}</shelfLocator></location>
                 <tableOfContents>{}</tableOfContents>
               </mods>"#,
            shelf, toc
        ))
        .unwrap()
    }

    fn session(mock: MockCatalogClient, toc_path: PathBuf) -> OrderSession<MockCatalogClient> {
        OrderSession::new(BatchService::new(mock, &BatchConfig::default()), toc_path)
    }

    #[test]
    fn test_setup_with_rush_deadline() {
        // RECCO, Peter Laurence, Patron, rush on 11/02/2026, public
        let mut prompt = ConsolePrompt::scripted("2\n2\n1\n1\n11/02/2026\n2\n");
        let setup = ask_setup(&mut prompt).unwrap();
        assert_eq!(setup.collection, Collection::Recco);
        assert_eq!(setup.curator, Curator::PeterLaurence);
        assert_eq!(setup.order_type, OrderType::Patron);
        assert_eq!(setup.rush_deadline, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert_eq!(setup.access_level, AccessLevel::Public);
    }

    #[test]
    fn test_call_numbers_are_asked_again() {
        let mut prompt = ConsolePrompt::new(
            std::io::Cursor::new("AWM LP\nawm lp 1–2\n".to_string()),
            Vec::new(),
        );
        let terms = ask_call_numbers(&mut prompt, None).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[1].as_str(), "AWM LP 2");

        let shown = String::from_utf8(prompt.into_output()).unwrap();
        assert!(shown.contains("One or more call numbers are invalid"));
    }

    #[test]
    fn test_preset_call_numbers_are_not_reprompted() {
        let mut prompt = ConsolePrompt::scripted("");
        let result = ask_call_numbers(&mut prompt, Some("AWM LP"));
        assert!(matches!(result, Err(AppError::InvalidSyntax(_))));
    }

    #[test]
    fn test_reason_only_when_not_downloadable() {
        let mut prompt = ConsolePrompt::scripted("1\n3\n");
        let delivery = ask_delivery(&mut prompt).unwrap();
        assert_eq!(delivery.downloadable, Downloadable::Yes);
        assert_eq!(delivery.download_restriction, None);
        assert_eq!(delivery.storage_class, StorageClass::Large);

        let mut prompt = ConsolePrompt::scripted("2\n1\n4\n");
        let delivery = ask_delivery(&mut prompt).unwrap();
        assert_eq!(
            delivery.download_restriction,
            Some(DownloadRestriction::HarvardPolicy)
        );
        assert_eq!(delivery.storage_class, StorageClass::Archival);
    }

    #[tokio::test]
    async fn test_full_session_with_toc_export() {
        let dir = tempfile::tempdir().unwrap();
        let toc_path = dir.path().join("table_of_contents_export.csv");

        let mut mock = MockCatalogClient::new();
        mock.expect_query()
            .returning(|term| Ok(vec![record(term.as_str(), "Side A -- Side B")]));

        // setup: AWM, Batiuk, Standard, no rush, restricted
        // delivery: not downloadable, License, Basic; then export the TOC
        let mut prompt = ConsolePrompt::scripted("1\n1\n2\n2\n1\n2\n2\n2\n1\n");
        let mut sink = MemorySink::new();
        let outcome = session(mock, toc_path.clone())
            .run(&mut prompt, Some("AWM SC 10-11"), today(), &mut sink)
            .await
            .unwrap();

        assert_eq!(
            outcome.batch.metadata.batch_name,
            "hcl-aps_batch_dropoff_AWM_SC_10_11_20261016EB"
        );
        assert_eq!(sink.rows.len(), 2);
        assert_eq!(sink.rows[0].download_restriction, "License");
        assert_eq!(sink.rows[0].storage_class, "Basic");
        assert_eq!(outcome.toc_export.as_deref(), Some(toc_path.as_path()));

        let exported = std::fs::read_to_string(&toc_path).unwrap();
        assert!(exported.contains("AWM SC 11,Side A -- Side B"));
    }

    #[tokio::test]
    async fn test_no_matches_stops_before_delivery_questions() {
        let mut mock = MockCatalogClient::new();
        mock.expect_query().returning(|_| Ok(vec![]));

        // setup answers only; delivery questions would exhaust the input
        let mut prompt = ConsolePrompt::scripted("1\n1\n2\n2\n1\n");
        let mut sink = MemorySink::new();
        let result = session(mock, PathBuf::from("unused.csv"))
            .run(&mut prompt, Some("AWM LP 1"), today(), &mut sink)
            .await;

        assert!(matches!(result, Err(AppError::NoMatches)));
        assert!(sink.metadata.is_none());
    }
}
