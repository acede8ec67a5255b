//! Subcommand implementations

use anyhow::Context;
use chrono::NaiveDate;
use oblig_core::{
    Catalog, CatalogIssue, Clock, ComplianceService, EngineConfig, FixedClock,
    GenerateTasksRequest, GenerateTasksResponse, InMemoryStore, SystemClock, TaskStore,
};
use oblig_model::{BusinessProfile, TaskInstance, UserId};
use oblig_scoring::ComplianceReport;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Inputs of `oblig generate`
#[derive(Debug, Clone)]
pub(crate) struct GenerateArgs {
    pub(crate) catalog: PathBuf,
    pub(crate) profile: PathBuf,
    pub(crate) tasks: Option<PathBuf>,
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) template: Option<String>,
    pub(crate) today: Option<NaiveDate>,
    pub(crate) config: Option<PathBuf>,
}

pub(crate) async fn generate(args: &GenerateArgs) -> anyhow::Result<GenerateTasksResponse> {
    let profile: BusinessProfile = read_json(&args.profile)?;

    let user = UserId::new();
    let store = Arc::new(InMemoryStore::new());
    store.put_profile(user, profile);
    if let Some(path) = &args.tasks {
        let existing: Vec<TaskInstance> = read_json(path)?;
        tracing::info!("Loaded {} existing tasks from {}", existing.len(), path.display());
        store.insert_tasks(user, existing).await?;
    }

    let clock: Arc<dyn Clock> = match args.today {
        Some(today) => Arc::new(FixedClock(today)),
        None => Arc::new(SystemClock),
    };
    let service = ComplianceService::from_files(
        &args.catalog,
        args.config.as_deref(),
        store.clone(),
        store,
    )
    .context("setting up the compliance engine")?
    .with_clock(clock);

    let mut request = GenerateTasksRequest::new(user);
    request.window_start = args.from;
    request.window_end = args.to;
    if let Some(template) = &args.template {
        request = request.with_template(template.as_str());
    }

    Ok(service.generate_tasks(request).await?)
}

pub(crate) async fn report(
    tasks: &Path,
    as_of: Option<NaiveDate>,
    config: Option<&Path>,
) -> anyhow::Result<ComplianceReport> {
    let config = load_config(config)?;
    let history: Vec<TaskInstance> = read_json(tasks)?;
    tracing::info!("Loaded {} tasks from {}", history.len(), tasks.display());

    let user = UserId::new();
    let store = Arc::new(InMemoryStore::new());
    store.insert_tasks(user, history).await?;

    let service = ComplianceService::new(Arc::new(Catalog::default()), store.clone(), store)
        .with_config(&config);

    Ok(service.compliance_report(user, as_of).await?)
}

pub(crate) fn validate(catalog: &Path) -> anyhow::Result<Vec<CatalogIssue>> {
    let loaded = Catalog::load(catalog)
        .with_context(|| format!("loading catalog {}", catalog.display()))?;
    let issues = loaded.validate();
    if !issues.is_empty() {
        tracing::warn!("Catalog {} has {} issues", catalog.display(), issues.len());
    }
    Ok(issues)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
