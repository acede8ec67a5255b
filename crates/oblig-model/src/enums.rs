//! Closed enumerations used across the catalog, profiles and tasks
//!
//! Every enum round-trips through its `snake_case` wire name via [`FromStr`],
//! [`Display`] and serde.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Error for a string that names no variant of a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    /// Enumeration name (e.g. `category`)
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name of this variant
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Legal form of a business
    BusinessType, "business type" {
        /// Single owner, unincorporated
        SoleProprietor => "sole_proprietor",
        /// General or limited partnership
        Partnership => "partnership",
        /// Limited liability or joint-stock company
        Company => "company",
        /// Non-profit organisation
        Nonprofit => "nonprofit",
        /// Cooperative
        Cooperative => "cooperative",
    }
}

wire_enum! {
    /// VAT registration status
    VatStatus, "vat status" {
        /// Below the threshold or otherwise exempt
        Exempt => "exempt",
        /// Registered VAT payer
        Registered => "registered",
        /// Registration requested, not yet confirmed
        Pending => "pending",
    }
}

wire_enum! {
    /// Industry sector
    Industry, "industry" {
        Retail => "retail",
        Hospitality => "hospitality",
        Construction => "construction",
        Manufacturing => "manufacturing",
        Transport => "transport",
        Healthcare => "healthcare",
        ProfessionalServices => "professional_services",
        Technology => "technology",
        Agriculture => "agriculture",
        Other => "other",
    }
}

wire_enum! {
    /// Obligation category, used for grouping in compliance reports
    Category, "category" {
        Vat => "vat",
        IncomeTax => "income_tax",
        SocialSecurity => "social_security",
        License => "license",
        FinancialReports => "financial_reports",
        LaborLaw => "labor_law",
        Municipality => "municipality",
        Insurance => "insurance",
        Other => "other",
    }
}

wire_enum! {
    /// Task priority
    Priority, "priority" {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}
