//! Business profile
//!
//! Read-only input owned by the surrounding application. Only `business_type`,
//! `vat_status` and `industry` take part in applicability matching.

use crate::enums::{BusinessType, Industry, VatStatus};
use serde::{Deserialize, Serialize};

/// Attributes of a business relevant to obligation selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Legal form
    pub business_type: BusinessType,
    /// VAT registration status
    pub vat_status: VatStatus,
    /// Industry sector, if the owner declared one
    #[serde(default)]
    pub industry: Option<Industry>,
    /// Municipality of registration (not used for matching)
    #[serde(default)]
    pub municipality: Option<String>,
    /// Number of employees (not used for matching)
    #[serde(default)]
    pub employee_count: Option<u32>,
}

impl BusinessProfile {
    /// Create profile with the two mandatory attributes
    #[inline]
    #[must_use]
    pub fn new(business_type: BusinessType, vat_status: VatStatus) -> Self {
        Self {
            business_type,
            vat_status,
            industry: None,
            municipality: None,
            employee_count: None,
        }
    }

    /// With industry sector
    #[inline]
    #[must_use]
    pub fn with_industry(mut self, industry: Industry) -> Self {
        self.industry = Some(industry);
        self
    }

    /// With municipality
    #[inline]
    #[must_use]
    pub fn with_municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = Some(municipality.into());
        self
    }

    /// With employee count
    #[inline]
    #[must_use]
    pub fn with_employees(mut self, count: u32) -> Self {
        self.employee_count = Some(count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_builder() {
        let profile = BusinessProfile::new(BusinessType::Company, VatStatus::Registered)
            .with_industry(Industry::Retail)
            .with_municipality("Skopje")
            .with_employees(12);

        assert_eq!(profile.industry, Some(Industry::Retail));
        assert_eq!(profile.municipality.as_deref(), Some("Skopje"));
        assert_eq!(profile.employee_count, Some(12));
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let json = r#"{"business_type":"sole_proprietor","vat_status":"exempt"}"#;
        let profile: BusinessProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.business_type, BusinessType::SoleProprietor);
        assert!(profile.industry.is_none());
        assert!(profile.employee_count.is_none());
    }

    #[test]
    fn unknown_vat_status_fails_deserialization() {
        let json = r#"{"business_type":"company","vat_status":"maybe"}"#;
        assert!(serde_json::from_str::<BusinessProfile>(json).is_err());
    }
}
