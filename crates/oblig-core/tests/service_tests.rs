//! End-to-end service behaviour over the in-memory store

use oblig_core::{
    Catalog, CatalogError, ComplianceService, ConfigError, EngineConfig, EngineError, FixedClock,
    GenerateTasksRequest, InMemoryStore, TaskStore,
};
use oblig_model::{Category, TaskInstance, UserId};
use oblig_scheduler::{GenerateError, RulePolicy};
use oblig_scoring::Grade;
use oblig_test_utils::{
    at, date, exempt_sole_proprietor, monthly_template, registered_company, sample_catalog,
};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;

struct Fixture {
    service: ComplianceService,
    store: Arc<InMemoryStore>,
    user: UserId,
}

fn fixture_with(templates: Vec<oblig_model::ObligationTemplate>, config: &EngineConfig) -> Fixture {
    let store = Arc::new(InMemoryStore::with_templates(templates));
    let user = UserId::new();
    store.put_profile(user, registered_company());

    let service = ComplianceService::new(store.clone(), store.clone(), store.clone())
        .with_config(config)
        .with_clock(Arc::new(FixedClock(date(2025, 1, 1))));

    Fixture {
        service,
        store,
        user,
    }
}

fn fixture() -> Fixture {
    fixture_with(sample_catalog(), &EngineConfig::default())
}

#[tokio::test]
async fn test_default_window_is_one_year_from_today() {
    let f = fixture();

    let response = f
        .service
        .generate_tasks(GenerateTasksRequest::new(f.user))
        .await
        .unwrap();

    assert_eq!(response.window.start(), date(2025, 1, 1));
    assert_eq!(response.window.end(), date(2025, 12, 31));
    // vat 12 + payroll 12 + annual accounts 1 + income tax 1
    assert_eq!(response.created.len(), 26);
    assert!(response.failures.is_empty());
    assert_eq!(f.store.task_count(f.user), 26);
}

#[tokio::test]
async fn test_second_call_creates_nothing() {
    let f = fixture();
    let request = GenerateTasksRequest::new(f.user);

    f.service.generate_tasks(request.clone()).await.unwrap();
    let second = f.service.generate_tasks(request).await.unwrap();

    assert!(second.created.is_empty());
    assert_eq!(second.already_present, 26);
    assert_eq!(f.store.task_count(f.user), 26);
}

#[tokio::test]
async fn test_targeted_generation_only_touches_one_template() {
    let f = fixture();
    let request = GenerateTasksRequest::new(f.user)
        .with_window(date(2025, 1, 1), date(2025, 3, 31))
        .with_template("vat-return");

    let response = f.service.generate_tasks(request).await.unwrap();

    assert_eq!(response.created.len(), 3);
    assert!(response
        .created
        .iter()
        .all(|t| t.category == Category::Vat));
}

#[tokio::test]
async fn test_unknown_template_is_not_found() {
    let f = fixture();
    let request = GenerateTasksRequest::new(f.user).with_template("no-such-form");

    let err = f.service.generate_tasks(request).await.unwrap_err();

    assert!(matches!(
        err,
        EngineError::Generate(GenerateError::TemplateNotFound(_))
    ));
    assert!(err.is_caller_error());
}

#[tokio::test]
async fn test_reversed_window_fails_before_profile_lookup() {
    let f = fixture();
    // unknown user: the window error must win
    let request = GenerateTasksRequest::new(UserId::new())
        .with_window(date(2025, 6, 1), date(2025, 5, 1));

    let err = f.service.generate_tasks(request).await.unwrap_err();

    assert!(matches!(
        err,
        EngineError::Generate(GenerateError::InvalidDateRange { .. })
    ));
}

#[tokio::test]
async fn test_missing_profile() {
    let f = fixture();
    let stranger = UserId::new();

    let err = f
        .service
        .generate_tasks(GenerateTasksRequest::new(stranger))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::ProfileNotFound(user) if user == stranger));
}

#[tokio::test]
async fn test_exempt_business_gets_no_vat_tasks() {
    let f = fixture();
    f.store.put_profile(f.user, exempt_sole_proprietor());

    let response = f
        .service
        .generate_tasks(GenerateTasksRequest::new(f.user))
        .await
        .unwrap();

    // income tax only
    assert_eq!(response.created.len(), 1);
    assert_eq!(response.created[0].category, Category::IncomeTax);
}

#[tokio::test]
async fn test_unsupported_rule_policy() {
    let mut templates = sample_catalog();
    templates.push(
        oblig_model::ObligationTemplate::new("weekly", "Weekly", Category::Other, "FREQ=WEEKLY"),
    );

    let skip = fixture_with(templates.clone(), &EngineConfig::default());
    let response = skip
        .service
        .generate_tasks(GenerateTasksRequest::new(skip.user))
        .await
        .unwrap();
    assert_eq!(response.failures.len(), 1);
    assert_eq!(response.created.len(), 26);

    let mut config = EngineConfig::default();
    config.generator.rule_policy = RulePolicy::Abort;
    let abort = fixture_with(templates, &config);
    let err = abort
        .service
        .generate_tasks(GenerateTasksRequest::new(abort.user))
        .await
        .unwrap_err();
    assert!(!err.is_caller_error());
    assert_eq!(abort.store.task_count(abort.user), 0);
}

#[tokio::test]
async fn test_report_after_completing_tasks() {
    let f = fixture_with(
        vec![monthly_template("vat-return", 25, Category::Vat)],
        &EngineConfig::default(),
    );
    let response = f
        .service
        .generate_tasks(
            GenerateTasksRequest::new(f.user).with_window(date(2025, 1, 1), date(2025, 4, 30)),
        )
        .await
        .unwrap();

    let ids: Vec<_> = response.created.iter().map(|t| t.id).collect();
    f.store.complete_task(f.user, ids[0], at(date(2025, 1, 20))).unwrap();
    f.store.complete_task(f.user, ids[1], at(date(2025, 2, 25))).unwrap();
    f.store.complete_task(f.user, ids[2], at(date(2025, 3, 30))).unwrap();

    let report = f
        .service
        .compliance_report(f.user, Some(date(2025, 4, 1)))
        .await
        .unwrap();

    // the April occurrence is not due yet
    assert_eq!(report.statistics.total, 3);
    assert_eq!(report.lifetime_statistics.total, 4);
    assert_eq!(report.statistics.completed_on_time, 2);
    assert_eq!(report.statistics.completed_late, 1);
    assert_eq!(report.display_score, 67);
    assert_eq!(report.grade, Grade::D);
    assert_eq!(report.recent_activity.upcoming_this_month, 1);
}

#[tokio::test]
async fn test_report_defaults_to_clock() {
    let f = fixture();
    let report = f.service.compliance_report(f.user, None).await.unwrap();

    assert_eq!(report.as_of, date(2025, 1, 1));
    assert_eq!(report.score, 100.0);
}

#[tokio::test]
async fn test_existing_task_is_not_regenerated() {
    let f = fixture();
    let template = &sample_catalog()[0];
    let task = TaskInstance::from_template(template, date(2025, 1, 25));
    f.store.insert_tasks(f.user, vec![task]).await.unwrap();

    let response = f
        .service
        .generate_tasks(GenerateTasksRequest::new(f.user))
        .await
        .unwrap();

    assert_eq!(response.already_present, 1);
    assert_eq!(response.created.len(), 25);
}

#[tokio::test]
async fn test_catalog_file_drives_service() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        "templates:
  - id: vat-return
    title: VAT return
    category: vat
    recurrence_rule: FREQ=MONTHLY;BYMONTHDAY=25
    applies_to_vat_status: [registered]
"
    )
    .unwrap();

    let catalog = Arc::new(Catalog::load(file.path()).unwrap());
    let store = Arc::new(InMemoryStore::new());
    let user = UserId::new();
    store.put_profile(user, registered_company());

    let service = ComplianceService::new(catalog, store.clone(), store)
        .with_clock(Arc::new(FixedClock(date(2025, 1, 1))));
    let response = service
        .generate_tasks(GenerateTasksRequest::new(user))
        .await
        .unwrap();

    assert_eq!(response.created.len(), 12);
}

#[test]
fn test_service_from_files() {
    let mut catalog = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(catalog, "templates: []").unwrap();
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[generator]\nrule_policy = \"abort\"").unwrap();
    let store = Arc::new(InMemoryStore::new());

    let service = ComplianceService::from_files(
        catalog.path(),
        Some(config.path()),
        store.clone(),
        store.clone(),
    )
    .unwrap();
    assert!(format!("{service:?}").contains("Abort"));

    let missing = ComplianceService::from_files(
        std::path::Path::new("/nonexistent/catalog.yaml"),
        None,
        store.clone(),
        store.clone(),
    )
    .unwrap_err();
    assert!(matches!(missing, EngineError::Catalog(CatalogError::Io { .. })));
    assert!(!missing.is_caller_error());

    let mut bad_config = tempfile::NamedTempFile::new().unwrap();
    writeln!(bad_config, "[generator]\nrule_policy = \"retry\"").unwrap();
    let invalid = ComplianceService::from_files(
        catalog.path(),
        Some(bad_config.path()),
        store.clone(),
        store,
    )
    .unwrap_err();
    assert!(matches!(invalid, EngineError::Config(ConfigError::Parse(_))));
}

#[test]
fn test_catalog_rejects_unknown_extension() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    assert!(matches!(
        Catalog::load(file.path()),
        Err(CatalogError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_config_file_loads() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[scoring]\nscoring_window_days = 90").unwrap();

    let config = EngineConfig::load(file.path()).unwrap();

    assert_eq!(config.scoring.scoring_window_days, 90);
    assert_eq!(config.generator.rule_policy, RulePolicy::Skip);
}

#[test]
fn test_bundled_catalog_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../catalog/obligations.yaml");

    let catalog = Catalog::load(path).unwrap();

    assert_eq!(catalog.len(), 12);
    assert_eq!(catalog.active().count(), 11);
    assert!(catalog.validate().is_empty());
}
