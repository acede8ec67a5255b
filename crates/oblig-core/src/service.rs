//! Compliance service
//!
//! Orchestrates the pure engine (generator, scorer) over the storage ports.

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::ports::{ProfileStore, TaskStore, TemplateCatalog};
use chrono::NaiveDate;
use oblig_model::{TaskInstance, TemplateId, UserId};
use oblig_scheduler::{DateWindow, GenerationRequest, TaskGenerator, TemplateFailure};
use oblig_scoring::{ComplianceReport, ComplianceScorer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Request to materialize tasks for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTasksRequest {
    /// Owner of the profile and the tasks
    pub user_id: UserId,
    /// First day of the window; defaults to today
    #[serde(default)]
    pub window_start: Option<NaiveDate>,
    /// Last day of the window; defaults to one year from the start
    #[serde(default)]
    pub window_end: Option<NaiveDate>,
    /// Restrict generation to one template
    #[serde(default)]
    pub template_id: Option<TemplateId>,
}

impl GenerateTasksRequest {
    /// Request with default window over the full catalog
    #[inline]
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            window_start: None,
            window_end: None,
            template_id: None,
        }
    }

    /// With explicit window bounds
    #[inline]
    #[must_use]
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.window_start = Some(start);
        self.window_end = Some(end);
        self
    }

    /// Restrict to one template
    #[inline]
    #[must_use]
    pub fn with_template(mut self, template_id: impl Into<TemplateId>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }
}

/// Result of [`ComplianceService::generate_tasks`]
#[derive(Debug, Clone, Serialize)]
pub struct GenerateTasksResponse {
    /// Window the call generated over
    pub window: DateWindow,
    /// Tasks the store accepted
    pub created: Vec<TaskInstance>,
    /// Templates skipped because of unsupported rules
    pub failures: Vec<TemplateFailure>,
    /// Occurrences skipped because they already existed
    pub already_present: usize,
}

/// Facade over generator, scorer and storage
pub struct ComplianceService {
    catalog: Arc<dyn TemplateCatalog>,
    profiles: Arc<dyn ProfileStore>,
    tasks: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock>,
    generator: TaskGenerator,
    scorer: ComplianceScorer,
}

impl ComplianceService {
    /// Create service with default configuration and the system clock
    #[must_use]
    pub fn new(
        catalog: Arc<dyn TemplateCatalog>,
        profiles: Arc<dyn ProfileStore>,
        tasks: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            catalog,
            profiles,
            tasks,
            clock: Arc::new(SystemClock),
            generator: TaskGenerator::default(),
            scorer: ComplianceScorer::default(),
        }
    }

    /// Create service over a catalog file, configured from an optional TOML file
    ///
    /// # Errors
    /// - [`EngineError::Catalog`] if the catalog cannot be loaded
    /// - [`EngineError::Config`] if the configuration cannot be loaded
    pub fn from_files(
        catalog: &Path,
        config: Option<&Path>,
        profiles: Arc<dyn ProfileStore>,
        tasks: Arc<dyn TaskStore>,
    ) -> Result<Self, EngineError> {
        let catalog = Catalog::load(catalog)?;
        let config = config
            .map(EngineConfig::load)
            .transpose()?
            .unwrap_or_default();

        Ok(Self::new(Arc::new(catalog), profiles, tasks).with_config(&config))
    }

    /// With engine configuration
    #[must_use]
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.generator = TaskGenerator::new(config.generator);
        self.scorer = ComplianceScorer::new(config.scoring);
        self
    }

    /// With clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Materialize the user's tasks over the requested window
    ///
    /// # Workflow
    /// 1. Resolve and validate the window (no I/O on failure)
    /// 2. Load the profile, the active templates and the existing generation keys
    /// 3. Generate and insert; the response lists only rows the store accepted
    ///
    /// # Errors
    /// - [`EngineError::Generate`] for a reversed window, an unknown target template,
    ///   or an unsupported rule under the abort policy
    /// - [`EngineError::ProfileNotFound`] if the user has no profile
    /// - [`EngineError::Store`] if a port fails
    pub async fn generate_tasks(
        &self,
        request: GenerateTasksRequest,
    ) -> Result<GenerateTasksResponse, EngineError> {
        let user = request.user_id;
        let window = DateWindow::resolve(
            request.window_start,
            request.window_end,
            self.clock.today(),
        )?;

        let profile = self
            .profiles
            .get_profile(user)
            .await?
            .ok_or(EngineError::ProfileNotFound(user))?;
        let templates = self.catalog.list_active_templates().await?;
        let existing = self
            .tasks
            .list_generation_keys(user, request.template_id.as_ref())
            .await?;

        let mut generation =
            GenerationRequest::new(&profile, &templates, window).with_existing_keys(&existing);
        if let Some(target) = request.template_id.as_ref() {
            generation = generation.with_target(target);
        }
        let outcome = self.generator.generate(&generation)?;

        let offered = outcome.created.len();
        let created = self.tasks.insert_tasks(user, outcome.created).await?;

        if !outcome.failures.is_empty() {
            tracing::warn!(
                "Generation for user {} skipped {} templates with unsupported rules",
                user,
                outcome.failures.len()
            );
        }
        if created.len() < offered {
            tracing::warn!(
                "Store rejected {} of {} generated tasks for user {}",
                offered - created.len(),
                offered,
                user
            );
        }
        tracing::info!(
            "Created {} tasks for user {} over {}..={}",
            created.len(),
            user,
            window.start(),
            window.end()
        );

        Ok(GenerateTasksResponse {
            window,
            created,
            failures: outcome.failures,
            already_present: outcome.already_present,
        })
    }

    /// Score the user's full task history
    ///
    /// # Errors
    /// [`EngineError::Store`] if the task store fails.
    pub async fn compliance_report(
        &self,
        user: UserId,
        as_of: Option<NaiveDate>,
    ) -> Result<ComplianceReport, EngineError> {
        let as_of = as_of.unwrap_or_else(|| self.clock.today());
        let tasks = self.tasks.list_tasks(user).await?;
        let report = self.scorer.score(&tasks, as_of);

        tracing::info!(
            "Compliance report for user {} as of {}: {} ({})",
            user,
            as_of,
            report.display_score,
            report.grade
        );
        Ok(report)
    }
}

impl std::fmt::Debug for ComplianceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceService")
            .field("today", &self.clock.today())
            .field("generator", &self.generator)
            .field("scorer", &self.scorer)
            .finish_non_exhaustive()
    }
}
