//! Obligation templates
//!
//! A template is immutable from the engine's point of view; creation and
//! deactivation happen in the surrounding catalog.

use crate::enums::{BusinessType, Category, Industry, Priority, VatStatus};
use crate::ids::TemplateId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Catalog entry describing a recurring compliance duty and who it applies to
///
/// Each `applies_to_*` set restricts one axis. An empty set places no restriction on
/// that axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationTemplate {
    /// Catalog identity
    pub id: TemplateId,
    /// Short title copied onto generated tasks
    pub title: String,
    /// Longer description copied onto generated tasks
    #[serde(default)]
    pub description: String,
    /// Obligation category
    pub category: Category,
    /// Priority given to generated tasks
    #[serde(default)]
    pub default_priority: Priority,
    /// Recurrence rule in its external string form (e.g. `FREQ=MONTHLY;BYMONTHDAY=15`)
    pub recurrence_rule: String,
    /// VAT statuses this template applies to
    #[serde(default)]
    pub applies_to_vat_status: BTreeSet<VatStatus>,
    /// Business types this template applies to
    #[serde(default)]
    pub applies_to_business_types: BTreeSet<BusinessType>,
    /// Industries this template applies to
    #[serde(default)]
    pub applies_to_industries: BTreeSet<Industry>,
    /// Inactive templates never generate tasks
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ObligationTemplate {
    /// Create an active, unrestricted template
    #[must_use]
    pub fn new(
        id: impl Into<TemplateId>,
        title: impl Into<String>,
        category: Category,
        recurrence_rule: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category,
            default_priority: Priority::default(),
            recurrence_rule: recurrence_rule.into(),
            applies_to_vat_status: BTreeSet::new(),
            applies_to_business_types: BTreeSet::new(),
            applies_to_industries: BTreeSet::new(),
            is_active: true,
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With default priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.default_priority = priority;
        self
    }

    /// Restrict to the given VAT statuses
    #[must_use]
    pub fn for_vat_status(mut self, statuses: impl IntoIterator<Item = VatStatus>) -> Self {
        self.applies_to_vat_status.extend(statuses);
        self
    }

    /// Restrict to the given business types
    #[must_use]
    pub fn for_business_types(mut self, types: impl IntoIterator<Item = BusinessType>) -> Self {
        self.applies_to_business_types.extend(types);
        self
    }

    /// Restrict to the given industries
    #[must_use]
    pub fn for_industries(mut self, industries: impl IntoIterator<Item = Industry>) -> Self {
        self.applies_to_industries.extend(industries);
        self
    }

    /// Mark template inactive
    #[inline]
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether any applicability axis is restricted
    #[inline]
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        !(self.applies_to_vat_status.is_empty()
            && self.applies_to_business_types.is_empty()
            && self.applies_to_industries.is_empty())
    }
}
