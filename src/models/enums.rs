//! Operator selections made while setting up a batch

use serde::{Deserialize, Serialize};

/// An enumerated answer offered by the choice provider.
///
/// `OPTIONS` is presented in order, numbered from 1.
pub trait Choice: Copy + Sized + 'static {
    const OPTIONS: &'static [Self];

    fn label(&self) -> &'static str;
}

macro_rules! impl_display_via_label {
    ($($ty:ty),* $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collection {
    Awm,
    Recco,
}

impl Collection {
    /// Initials closing the batch name
    pub fn curator_initials(&self) -> &'static str {
        match self {
            Collection::Awm => "EB",
            Collection::Recco => "PL",
        }
    }
}

impl Choice for Collection {
    const OPTIONS: &'static [Self] = &[Collection::Awm, Collection::Recco];

    fn label(&self) -> &'static str {
        match self {
            Collection::Awm => "AWM Collection",
            Collection::Recco => "RECCO Collection",
        }
    }
}

// ---------------------------------------------------------------------------
// Curator
// ---------------------------------------------------------------------------

/// Curator granting copy permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Curator {
    ElizabethBatiuk,
    PeterLaurence,
}

impl Choice for Curator {
    const OPTIONS: &'static [Self] = &[Curator::ElizabethBatiuk, Curator::PeterLaurence];

    fn label(&self) -> &'static str {
        match self {
            Curator::ElizabethBatiuk => "Elizabeth Batiuk",
            Curator::PeterLaurence => "Peter Laurence",
        }
    }
}

// ---------------------------------------------------------------------------
// OrderType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Patron,
    Standard,
}

impl Choice for OrderType {
    const OPTIONS: &'static [Self] = &[OrderType::Patron, OrderType::Standard];

    fn label(&self) -> &'static str {
        match self {
            OrderType::Patron => "Patron",
            OrderType::Standard => "Standard",
        }
    }
}

// ---------------------------------------------------------------------------
// AccessLevel
// ---------------------------------------------------------------------------

/// DRS access flag written on every inventory row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
    Restricted,
    Public,
    NoAccess,
}

impl Choice for AccessLevel {
    const OPTIONS: &'static [Self] = &[
        AccessLevel::Restricted,
        AccessLevel::Public,
        AccessLevel::NoAccess,
    ];

    fn label(&self) -> &'static str {
        match self {
            AccessLevel::Restricted => "R",
            AccessLevel::Public => "P",
            AccessLevel::NoAccess => "N",
        }
    }
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Downloadable {
    Yes,
    No,
}

impl Choice for Downloadable {
    const OPTIONS: &'static [Self] = &[Downloadable::Yes, Downloadable::No];

    fn label(&self) -> &'static str {
        match self {
            Downloadable::Yes => "TRUE",
            Downloadable::No => "FALSE",
        }
    }
}

/// Reason a batch is withheld from download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadRestriction {
    HarvardPolicy,
    License,
    RiskAssessment,
    Statute,
    Copyright,
}

impl Choice for DownloadRestriction {
    const OPTIONS: &'static [Self] = &[
        DownloadRestriction::HarvardPolicy,
        DownloadRestriction::License,
        DownloadRestriction::RiskAssessment,
        DownloadRestriction::Statute,
        DownloadRestriction::Copyright,
    ];

    fn label(&self) -> &'static str {
        match self {
            DownloadRestriction::HarvardPolicy => "Harvard Policy",
            DownloadRestriction::License => "License",
            DownloadRestriction::RiskAssessment => "Risk Assessment",
            DownloadRestriction::Statute => "Statute",
            DownloadRestriction::Copyright => "Copyright",
        }
    }
}

// ---------------------------------------------------------------------------
// StorageClass
// ---------------------------------------------------------------------------

/// Archival file storage class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageClass {
    Sensitive,
    Basic,
    Large,
    Archival,
}

impl Choice for StorageClass {
    const OPTIONS: &'static [Self] = &[
        StorageClass::Sensitive,
        StorageClass::Basic,
        StorageClass::Large,
        StorageClass::Archival,
    ];

    fn label(&self) -> &'static str {
        match self {
            StorageClass::Sensitive => "Sensitive",
            StorageClass::Basic => "Basic",
            StorageClass::Large => "Large",
            StorageClass::Archival => "Archival",
        }
    }
}

// ---------------------------------------------------------------------------
// YesNo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl Choice for YesNo {
    const OPTIONS: &'static [Self] = &[YesNo::Yes, YesNo::No];

    fn label(&self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl_display_via_label!(
    Collection,
    Curator,
    OrderType,
    AccessLevel,
    Downloadable,
    DownloadRestriction,
    StorageClass,
    YesNo,
);
