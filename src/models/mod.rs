//! Data models for the batch order builder

pub mod batch;
pub mod call_number;
pub mod enums;
pub mod item;

// Re-export commonly used types
pub use batch::{
    batch_name, format_us_date, BatchDescriptor, BatchMetadata, BatchSetup, CallNumberSpan,
    DeliveryOptions,
};
pub use call_number::{normalize, CallNumberTerm};
pub use enums::{
    AccessLevel, Choice, Collection, Curator, DownloadRestriction, Downloadable, OrderType,
    StorageClass, YesNo,
};
pub use item::{CreatorColumn, CreatorsByRole, ExtractedItem, InventoryRow, ItemFormat, RowDefaults};
