//! Batch order services

pub mod batch;
pub mod catalog;
pub mod prompt;
pub mod session;
pub mod sink;
pub mod toc;

pub use batch::{BatchOutcome, BatchService, MatchReport};
pub use catalog::{CatalogClient, LibraryCloudClient};
pub use prompt::{select, ChoiceProvider, ConsolePrompt};
pub use session::{OrderSession, SessionOutcome};
pub use sink::{CsvWorkbookSink, MemorySink, TabularSink};
pub use toc::TocIndex;
