//! Task instances and generation keys

use crate::enums::{Category, Priority};
use crate::ids::{TaskId, TemplateId};
use crate::template::ObligationTemplate;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Natural idempotency key of a generated occurrence
///
/// For a given user no two tasks may share the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GenerationKey {
    /// Template the occurrence came from
    pub template_id: TemplateId,
    /// Due date of the occurrence
    pub due_date: NaiveDate,
}

impl GenerationKey {
    /// Create new key
    #[inline]
    #[must_use]
    pub fn new(template_id: TemplateId, due_date: NaiveDate) -> Self {
        Self {
            template_id,
            due_date,
        }
    }
}

impl Display for GenerationKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.template_id, self.due_date)
    }
}

/// One concrete, dated occurrence of an obligation for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInstance {
    /// Task identity
    #[serde(default)]
    pub id: TaskId,
    /// Source template; `None` for ad-hoc tasks created by the user
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Calendar due date
    pub due_date: NaiveDate,
    /// Category
    #[serde(default)]
    pub category: Category,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
    /// Completion timestamp, set externally when the user marks the task done
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskInstance {
    /// Create an ad-hoc task with no template
    #[must_use]
    pub fn ad_hoc(title: impl Into<String>, due_date: NaiveDate, category: Category) -> Self {
        Self {
            id: TaskId::new(),
            template_id: None,
            title: title.into(),
            description: String::new(),
            due_date,
            category,
            priority: Priority::default(),
            completed_at: None,
        }
    }

    /// Instantiate a template occurrence on `due_date`
    #[must_use]
    pub fn from_template(template: &ObligationTemplate, due_date: NaiveDate) -> Self {
        Self {
            id: TaskId::new(),
            template_id: Some(template.id.clone()),
            title: template.title.clone(),
            description: template.description.clone(),
            due_date,
            category: template.category,
            priority: template.default_priority,
            completed_at: None,
        }
    }

    /// Mark completed at `at`
    #[inline]
    #[must_use]
    pub fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    /// Generation key, if the task came from a template
    #[must_use]
    pub fn generation_key(&self) -> Option<GenerationKey> {
        self.template_id
            .as_ref()
            .map(|id| GenerationKey::new(id.clone(), self.due_date))
    }

    /// Whether the task has been completed
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Calendar date of completion
    #[inline]
    #[must_use]
    pub fn completed_on(&self) -> Option<NaiveDate> {
        self.completed_at.map(|at| at.date_naive())
    }

    /// Pending and past its due date as of `as_of`
    #[inline]
    #[must_use]
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        !self.is_completed() && self.due_date < as_of
    }

    /// `Some(true)` if completed on or before the due date, `None` while pending
    #[inline]
    #[must_use]
    pub fn completed_on_time(&self) -> Option<bool> {
        self.completed_on().map(|done| done <= self.due_date)
    }
}
