//! In-memory implementation of every storage port
//!
//! Backed by [`DashMap`]; writes for one user are serialized by the map's entry
//! guard, so the generation-key uniqueness check and the insert happen atomically.

use crate::error::StoreError;
use crate::ports::{ProfileStore, TaskStore, TemplateCatalog};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use oblig_model::{
    BusinessProfile, GenerationKey, ObligationTemplate, TaskId, TaskInstance, TemplateId, UserId,
};
use std::collections::HashSet;

/// Thread-safe store for profiles, templates and tasks
#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: DashMap<UserId, BusinessProfile>,
    templates: DashMap<TemplateId, ObligationTemplate>,
    tasks: DashMap<UserId, Vec<TaskInstance>>,
}

impl InMemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the given templates
    #[must_use]
    pub fn with_templates(templates: impl IntoIterator<Item = ObligationTemplate>) -> Self {
        let store = Self::new();
        for template in templates {
            store.put_template(template);
        }
        store
    }

    /// Set or replace a user's profile
    pub fn put_profile(&self, user: UserId, profile: BusinessProfile) {
        self.profiles.insert(user, profile);
    }

    /// Add or replace a template
    pub fn put_template(&self, template: ObligationTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Mark a task completed at `at`
    ///
    /// # Errors
    /// [`StoreError::TaskNotFound`] if the user has no task with this id.
    pub fn complete_task(
        &self,
        user: UserId,
        task: TaskId,
        at: DateTime<Utc>,
    ) -> Result<TaskInstance, StoreError> {
        let mut stored = self
            .tasks
            .get_mut(&user)
            .ok_or(StoreError::TaskNotFound { user, task })?;
        let instance = stored
            .iter_mut()
            .find(|t| t.id == task)
            .ok_or(StoreError::TaskNotFound { user, task })?;

        instance.completed_at = Some(at);
        Ok(instance.clone())
    }

    /// Number of tasks stored for a user
    #[must_use]
    pub fn task_count(&self, user: UserId) -> usize {
        self.tasks.get(&user).map_or(0, |tasks| tasks.len())
    }
}

#[async_trait]
impl TemplateCatalog for InMemoryStore {
    async fn list_active_templates(&self) -> Result<Vec<ObligationTemplate>, StoreError> {
        let mut active: Vec<ObligationTemplate> = self
            .templates
            .iter()
            .filter(|entry| entry.is_active)
            .map(|entry| entry.value().clone())
            .collect();
        active.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(active)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, user: UserId) -> Result<Option<BusinessProfile>, StoreError> {
        Ok(self.profiles.get(&user).map(|p| p.value().clone()))
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn list_generation_keys(
        &self,
        user: UserId,
        template: Option<&TemplateId>,
    ) -> Result<HashSet<GenerationKey>, StoreError> {
        let Some(tasks) = self.tasks.get(&user) else {
            return Ok(HashSet::new());
        };
        Ok(tasks
            .iter()
            .filter_map(TaskInstance::generation_key)
            .filter(|key| template.map_or(true, |id| &key.template_id == id))
            .collect())
    }

    async fn insert_tasks(
        &self,
        user: UserId,
        tasks: Vec<TaskInstance>,
    ) -> Result<Vec<TaskInstance>, StoreError> {
        let mut stored = self.tasks.entry(user).or_default();
        let mut keys: HashSet<GenerationKey> = stored
            .iter()
            .filter_map(TaskInstance::generation_key)
            .collect();

        let offered = tasks.len();
        let mut inserted = Vec::with_capacity(offered);
        for task in tasks {
            if let Some(key) = task.generation_key() {
                if !keys.insert(key) {
                    continue;
                }
            }
            stored.push(task.clone());
            inserted.push(task);
        }

        if inserted.len() < offered {
            tracing::debug!(
                "Dropped {} duplicate tasks for user {}",
                offered - inserted.len(),
                user
            );
        }
        Ok(inserted)
    }

    async fn list_tasks(&self, user: UserId) -> Result<Vec<TaskInstance>, StoreError> {
        Ok(self
            .tasks
            .get(&user)
            .map(|tasks| tasks.value().clone())
            .unwrap_or_default())
    }
}
