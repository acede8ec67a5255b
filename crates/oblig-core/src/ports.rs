//! Storage ports
//!
//! The service only talks to persistence through these traits. Implementations must
//! be shareable across tasks.

use crate::error::StoreError;
use async_trait::async_trait;
use oblig_model::{
    BusinessProfile, GenerationKey, ObligationTemplate, TaskInstance, TemplateId, UserId,
};
use std::collections::HashSet;

/// Source of obligation templates
#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// Every template with `is_active` set
    async fn list_active_templates(&self) -> Result<Vec<ObligationTemplate>, StoreError>;
}

/// Business profiles by user
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile for `user`, `None` when the user has none
    async fn get_profile(&self, user: UserId) -> Result<Option<BusinessProfile>, StoreError>;
}

/// Task instances by user
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Generation keys of the user's template-derived tasks, optionally for one template
    async fn list_generation_keys(
        &self,
        user: UserId,
        template: Option<&TemplateId>,
    ) -> Result<HashSet<GenerationKey>, StoreError>;

    /// Insert tasks, returning the rows actually stored
    ///
    /// Rows whose generation key is already stored for the user are dropped.
    async fn insert_tasks(
        &self,
        user: UserId,
        tasks: Vec<TaskInstance>,
    ) -> Result<Vec<TaskInstance>, StoreError>;

    /// Every task of the user
    async fn list_tasks(&self, user: UserId) -> Result<Vec<TaskInstance>, StoreError>;
}
