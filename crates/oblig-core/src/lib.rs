//! Oblig Core
//!
//! Service layer tying the obligation engine to storage.
//!
//! # Core Concepts
//!
//! - [`ComplianceService`]: generates tasks and scores users over the ports
//! - [`TemplateCatalog`], [`ProfileStore`], [`TaskStore`]: async storage ports
//! - [`Catalog`]: YAML/JSON obligation catalog with validation
//! - [`InMemoryStore`]: `DashMap`-backed implementation of every port
//! - [`EngineConfig`]: TOML configuration for generator and scorer
//! - [`Clock`]: injected source of "today"
//!
//! # Example
//!
//! ```rust,ignore
//! use oblig_core::{Catalog, ComplianceService, GenerateTasksRequest, InMemoryStore};
//!
//! let catalog = Arc::new(Catalog::load("catalog/obligations.yaml")?);
//! let store = Arc::new(InMemoryStore::new());
//! store.put_profile(user, profile);
//!
//! let service = ComplianceService::new(catalog, store.clone(), store);
//! let response = service.generate_tasks(GenerateTasksRequest::new(user)).await?;
//! let report = service.compliance_report(user, None).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod catalog;
mod clock;
mod config;
mod error;
mod memory;
mod ports;
mod service;

pub use catalog::{Catalog, CatalogIssue};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use error::{CatalogError, ConfigError, EngineError, StoreError};
pub use memory::InMemoryStore;
pub use ports::{ProfileStore, TaskStore, TemplateCatalog};
pub use service::{ComplianceService, GenerateTasksRequest, GenerateTasksResponse};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
