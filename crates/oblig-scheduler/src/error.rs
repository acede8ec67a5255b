//! Error types for task generation

use chrono::NaiveDate;
use oblig_model::TemplateId;
use oblig_recurrence::RecurrenceError;

/// Task generation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// Window start after window end
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Requested template absent from the catalog or inactive
    #[error("template not found: {0}")]
    TemplateNotFound(TemplateId),

    /// Template rule outside the supported subset
    ///
    /// Only returned when the generator runs with [`crate::RulePolicy::Abort`].
    #[error("unsupported recurrence rule '{rule}' on template {template_id}: {source}")]
    UnsupportedRecurrenceRule {
        template_id: TemplateId,
        rule: String,
        #[source]
        source: RecurrenceError,
    },
}

impl GenerateError {
    /// Error caused by the request rather than the catalog
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateRange { .. } | Self::TemplateNotFound(_)
        )
    }
}
