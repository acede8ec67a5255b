//! Oblig Scheduler
//!
//! Turns an obligation catalog and a business profile into dated task instances.
//!
//! # Core Concepts
//!
//! - [`ApplicabilityMatcher`]: decides whether a template applies to a profile
//! - [`DateWindow`]: validated, inclusive generation horizon
//! - [`TaskGenerator`]: expands applicable templates over a window, skipping
//!   occurrences that already exist
//!
//! # Example
//!
//! ```rust,ignore
//! use oblig_scheduler::{DateWindow, GenerationRequest, TaskGenerator};
//!
//! let window = DateWindow::one_year_from(today);
//! let request = GenerationRequest::new(&profile, &catalog, window)
//!     .with_existing_keys(&existing);
//!
//! let outcome = TaskGenerator::default().generate(&request)?;
//! store.insert(outcome.created);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod applicability;
mod error;
mod generator;
mod window;

pub use applicability::{ApplicabilityMatcher, Exclusion};
pub use error::GenerateError;
pub use generator::{
    GenerationOutcome, GenerationRequest, GeneratorConfig, RulePolicy, TaskGenerator,
    TemplateFailure,
};
pub use window::DateWindow;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
