//! Task generation
//!
//! Expands applicable templates over a window into task instances. Generation is
//! idempotent with respect to the caller-supplied set of existing generation keys:
//! running it twice over overlapping windows never produces the same occurrence twice.

use crate::applicability::ApplicabilityMatcher;
use crate::error::GenerateError;
use crate::window::DateWindow;
use oblig_model::{BusinessProfile, GenerationKey, ObligationTemplate, TaskInstance, TemplateId};
use oblig_recurrence::{RecurrenceError, RecurrenceRule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What to do with a template whose recurrence rule cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePolicy {
    /// Record a [`TemplateFailure`] and keep generating for the rest of the catalog
    #[default]
    Skip,
    /// Fail the whole call with [`GenerateError::UnsupportedRecurrenceRule`]
    Abort,
}

/// Generator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Handling of unsupported recurrence rules
    pub rule_policy: RulePolicy,
}

impl GeneratorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With rule policy
    #[inline]
    #[must_use]
    pub fn with_rule_policy(mut self, policy: RulePolicy) -> Self {
        self.rule_policy = policy;
        self
    }
}

/// Input of a single generation call
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Business the tasks are generated for
    pub profile: &'a BusinessProfile,
    /// Template catalog
    pub templates: &'a [ObligationTemplate],
    /// Horizon
    pub window: DateWindow,
    /// Keys of tasks already materialized for this user
    pub existing_keys: Option<&'a HashSet<GenerationKey>>,
    /// Restrict generation to one template
    pub target: Option<&'a TemplateId>,
}

impl<'a> GenerationRequest<'a> {
    /// Create request over the full catalog with no existing tasks
    #[inline]
    #[must_use]
    pub fn new(
        profile: &'a BusinessProfile,
        templates: &'a [ObligationTemplate],
        window: DateWindow,
    ) -> Self {
        Self {
            profile,
            templates,
            window,
            existing_keys: None,
            target: None,
        }
    }

    /// With keys of already materialized tasks
    #[inline]
    #[must_use]
    pub fn with_existing_keys(mut self, keys: &'a HashSet<GenerationKey>) -> Self {
        self.existing_keys = Some(keys);
        self
    }

    /// Restrict to a single template
    #[inline]
    #[must_use]
    pub fn with_target(mut self, template_id: &'a TemplateId) -> Self {
        self.target = Some(template_id);
        self
    }

    fn already_exists(&self, key: &GenerationKey) -> bool {
        self.existing_keys.is_some_and(|keys| keys.contains(key))
    }
}

/// Template skipped because of an unsupported recurrence rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateFailure {
    /// Offending template
    pub template_id: TemplateId,
    /// Rule string as written in the catalog
    pub rule: String,
    /// Human-readable reason
    pub reason: String,
    /// Parse error
    #[serde(skip)]
    pub error: RecurrenceError,
}

impl TemplateFailure {
    fn new(template: &ObligationTemplate, error: RecurrenceError) -> Self {
        Self {
            template_id: template.id.clone(),
            rule: template.recurrence_rule.clone(),
            reason: error.to_string(),
            error,
        }
    }
}

/// Result of a generation call
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationOutcome {
    /// New task instances, ordered by due date then template id
    pub created: Vec<TaskInstance>,
    /// Templates skipped under [`RulePolicy::Skip`]
    pub failures: Vec<TemplateFailure>,
    /// Occurrences skipped because their key already existed
    pub already_present: usize,
    /// Templates that were active, applicable and expanded
    pub templates_applied: usize,
}

impl GenerationOutcome {
    /// Whether every selected template generated cleanly
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generates task instances from an obligation catalog
#[derive(Debug, Clone, Default)]
pub struct TaskGenerator {
    matcher: ApplicabilityMatcher,
    config: GeneratorConfig,
}

impl TaskGenerator {
    /// Create generator with configuration
    #[inline]
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            matcher: ApplicabilityMatcher::new(),
            config,
        }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate task instances for the request
    ///
    /// # Workflow
    /// 1. Restrict to the target template when one is requested
    /// 2. Keep active templates that apply to the profile
    /// 3. Expand each rule over the window
    /// 4. Drop occurrences whose key already exists
    ///
    /// # Errors
    /// - [`GenerateError::TemplateNotFound`] if the target is absent or inactive
    /// - [`GenerateError::UnsupportedRecurrenceRule`] under [`RulePolicy::Abort`]
    pub fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<GenerationOutcome, GenerateError> {
        let selected: Vec<&ObligationTemplate> = match request.target {
            Some(target) => {
                let template = request
                    .templates
                    .iter()
                    .find(|t| &t.id == target && t.is_active)
                    .ok_or_else(|| GenerateError::TemplateNotFound(target.clone()))?;
                vec![template]
            }
            None => request.templates.iter().collect(),
        };

        let mut outcome = GenerationOutcome::default();
        let mut produced: HashSet<GenerationKey> = HashSet::new();

        for template in selected {
            if !template.is_active {
                tracing::debug!("Skipping inactive template {}", template.id);
                continue;
            }
            if let Err(exclusion) = self.matcher.check(template, request.profile) {
                tracing::debug!("Template {} does not apply: {}", template.id, exclusion);
                continue;
            }

            let rule = match template.recurrence_rule.parse::<RecurrenceRule>() {
                Ok(rule) => rule,
                Err(error) => match self.config.rule_policy {
                    RulePolicy::Abort => {
                        return Err(GenerateError::UnsupportedRecurrenceRule {
                            template_id: template.id.clone(),
                            rule: template.recurrence_rule.clone(),
                            source: error,
                        });
                    }
                    RulePolicy::Skip => {
                        tracing::warn!(
                            "Skipping template {} with unsupported rule '{}': {}",
                            template.id,
                            template.recurrence_rule,
                            error
                        );
                        outcome.failures.push(TemplateFailure::new(template, error));
                        continue;
                    }
                },
            };

            outcome.templates_applied += 1;
            for due_date in rule.expand(request.window.start(), request.window.end()) {
                let key = GenerationKey::new(template.id.clone(), due_date);
                if request.already_exists(&key) {
                    outcome.already_present += 1;
                    continue;
                }
                if produced.insert(key) {
                    outcome
                        .created
                        .push(TaskInstance::from_template(template, due_date));
                }
            }
        }

        outcome
            .created
            .sort_by(|a, b| (a.due_date, &a.template_id).cmp(&(b.due_date, &b.template_id)));

        tracing::info!(
            "Generated {} tasks from {} templates ({} already present, {} failed) for {}..={}",
            outcome.created.len(),
            outcome.templates_applied,
            outcome.already_present,
            outcome.failures.len(),
            request.window.start(),
            request.window.end()
        );

        Ok(outcome)
    }
}
