//! Oblig Model
//!
//! Domain types shared by the obligation scheduler and the compliance scorer.
//!
//! # Core Concepts
//!
//! - [`BusinessProfile`]: the attributes of a business that decide which obligations apply
//! - [`ObligationTemplate`]: a catalog entry describing a recurring compliance duty
//! - [`TaskInstance`]: one dated occurrence of an obligation for a user
//! - [`GenerationKey`]: `(template, due date)` pair used to avoid duplicate instantiation
//!
//! All enumerations are closed and serialize as `snake_case` strings. Unknown values are
//! rejected at the serde boundary so the pure engine functions never see them.
//!
//! # Example
//!
//! ```rust
//! use oblig_model::{BusinessProfile, BusinessType, VatStatus};
//!
//! let profile = BusinessProfile::new(BusinessType::Company, VatStatus::Registered);
//! assert!(profile.industry.is_none());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod enums;
mod ids;
mod profile;
mod task;
mod template;

pub use enums::{BusinessType, Category, Industry, ParseEnumError, Priority, VatStatus};
pub use ids::{TaskId, TemplateId, UserId};
pub use profile::BusinessProfile;
pub use task::{GenerationKey, TaskInstance};
pub use template::ObligationTemplate;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
