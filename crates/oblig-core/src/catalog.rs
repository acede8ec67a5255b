//! Obligation catalog
//!
//! Catalogs are authored as YAML or JSON documents with a single `templates` list:
//!
//! ```yaml
//! templates:
//!   - id: vat-return
//!     title: Monthly VAT return
//!     category: vat
//!     default_priority: high
//!     recurrence_rule: FREQ=MONTHLY;BYMONTHDAY=25
//!     applies_to_vat_status: [registered]
//! ```

use crate::error::{CatalogError, StoreError};
use crate::ports::TemplateCatalog;
use async_trait::async_trait;
use indexmap::IndexMap;
use oblig_model::{ObligationTemplate, TemplateId};
use oblig_recurrence::{RecurrenceError, RecurrenceRule};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk shape of a catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogDocument {
    templates: Vec<ObligationTemplate>,
}

/// Problem found by [`Catalog::validate`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogIssue {
    /// Template id used more than once; the first definition wins
    #[error("duplicate template id: {0}")]
    DuplicateId(TemplateId),

    /// Recurrence rule outside the supported subset
    #[error("template {template_id}: unsupported recurrence rule '{rule}': {source}")]
    UnsupportedRule {
        template_id: TemplateId,
        rule: String,
        #[source]
        source: RecurrenceError,
    },

    /// Blank title
    #[error("template {0}: empty title")]
    EmptyTitle(TemplateId),
}

/// Ordered set of obligation templates, indexed by id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: IndexMap<TemplateId, ObligationTemplate>,
    duplicates: Vec<TemplateId>,
}

impl Catalog {
    /// Build from templates, keeping the first definition of each id
    #[must_use]
    pub fn from_templates(templates: impl IntoIterator<Item = ObligationTemplate>) -> Self {
        let mut catalog = Self::default();
        for template in templates {
            if catalog.templates.contains_key(&template.id) {
                catalog.duplicates.push(template.id.clone());
                continue;
            }
            catalog.templates.insert(template.id.clone(), template);
        }
        catalog
    }

    /// Parse a YAML document
    ///
    /// # Errors
    /// [`CatalogError::Yaml`] on malformed YAML or unknown enum values.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(content)?;
        Ok(Self::from_templates(document.templates))
    }

    /// Parse a JSON document
    ///
    /// # Errors
    /// [`CatalogError::Json`] on malformed JSON or unknown enum values.
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(content)?;
        Ok(Self::from_templates(document.templates))
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    ///
    /// # Errors
    /// - [`CatalogError::UnsupportedFormat`] for any other extension
    /// - [`CatalogError::Io`] if the file cannot be read
    /// - parse errors as for [`Self::from_yaml_str`] / [`Self::from_json_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, CatalogError> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = parse(&content)?;

        tracing::info!("Loaded {} templates from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Number of distinct templates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog holds no templates
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &TemplateId) -> Option<&ObligationTemplate> {
        self.templates.get(id)
    }

    /// Templates in authoring order
    pub fn iter(&self) -> impl Iterator<Item = &ObligationTemplate> {
        self.templates.values()
    }

    /// Active templates in authoring order
    pub fn active(&self) -> impl Iterator<Item = &ObligationTemplate> {
        self.iter().filter(|t| t.is_active)
    }

    /// Every problem in the catalog, in authoring order, duplicates first
    #[must_use]
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues: Vec<CatalogIssue> = self
            .duplicates
            .iter()
            .cloned()
            .map(CatalogIssue::DuplicateId)
            .collect();

        for template in self.iter() {
            if template.title.trim().is_empty() {
                issues.push(CatalogIssue::EmptyTitle(template.id.clone()));
            }
            if let Err(source) = template.recurrence_rule.parse::<RecurrenceRule>() {
                issues.push(CatalogIssue::UnsupportedRule {
                    template_id: template.id.clone(),
                    rule: template.recurrence_rule.clone(),
                    source,
                });
            }
        }

        issues
    }
}

#[async_trait]
impl TemplateCatalog for Catalog {
    async fn list_active_templates(&self) -> Result<Vec<ObligationTemplate>, StoreError> {
        Ok(self.active().cloned().collect())
    }
}
