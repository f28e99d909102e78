//! MODS record parsing, matching and extraction
//!
//! LibraryCloud returns MODS XML. This module parses it into owned records,
//! decides which records carry a requested call number, and translates the
//! matches into inventory items.

pub mod extractor;
pub mod matcher;
pub mod parser;

pub use extractor::MetadataExtractor;
pub use matcher::match_records;
pub use parser::{Element, ModsRecord, MODS_NS};
