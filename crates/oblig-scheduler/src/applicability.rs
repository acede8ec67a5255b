//! Template applicability
//!
//! A template declares up to three restriction sets (VAT status, business type,
//! industry). An empty set places no restriction on its axis; the axes combine with
//! logical AND.

use oblig_model::{BusinessProfile, BusinessType, Industry, ObligationTemplate, VatStatus};
use std::collections::BTreeSet;

/// Applicability check between templates and business profiles
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicabilityMatcher;

impl ApplicabilityMatcher {
    /// Create new matcher instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether `template` applies to `profile`
    #[inline]
    #[must_use]
    pub fn applies(&self, template: &ObligationTemplate, profile: &BusinessProfile) -> bool {
        self.check(template, profile).is_ok()
    }

    /// Check every axis, reporting the first one that excludes the profile
    ///
    /// A profile without an industry fails an industry-restricted template.
    ///
    /// # Errors
    /// [`Exclusion`] naming the failing axis.
    pub fn check(
        &self,
        template: &ObligationTemplate,
        profile: &BusinessProfile,
    ) -> Result<(), Exclusion> {
        if !permits(&template.applies_to_vat_status, Some(&profile.vat_status)) {
            return Err(Exclusion::VatStatus {
                required: template.applies_to_vat_status.clone(),
                actual: profile.vat_status,
            });
        }

        if !permits(
            &template.applies_to_business_types,
            Some(&profile.business_type),
        ) {
            return Err(Exclusion::BusinessType {
                required: template.applies_to_business_types.clone(),
                actual: profile.business_type,
            });
        }

        if !permits(&template.applies_to_industries, profile.industry.as_ref()) {
            return Err(Exclusion::Industry {
                required: template.applies_to_industries.clone(),
                actual: profile.industry,
            });
        }

        Ok(())
    }
}

fn permits<T: Ord>(allowed: &BTreeSet<T>, value: Option<&T>) -> bool {
    allowed.is_empty() || value.is_some_and(|v| allowed.contains(v))
}

/// Axis on which a profile failed a template's restrictions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Exclusion {
    /// VAT status not in the template's set
    #[error("requires vat status in {required:?}, profile is {actual}")]
    VatStatus {
        required: BTreeSet<VatStatus>,
        actual: VatStatus,
    },

    /// Business type not in the template's set
    #[error("requires business type in {required:?}, profile is {actual}")]
    BusinessType {
        required: BTreeSet<BusinessType>,
        actual: BusinessType,
    },

    /// Industry missing or not in the template's set
    #[error("requires industry in {required:?}, profile has {actual:?}")]
    Industry {
        required: BTreeSet<Industry>,
        actual: Option<Industry>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use oblig_model::Category;

    fn template() -> ObligationTemplate {
        ObligationTemplate::new("t", "T", Category::Other, "FREQ=MONTHLY;BYMONTHDAY=1")
    }

    #[test]
    fn unrestricted_template_applies_to_everyone() {
        let matcher = ApplicabilityMatcher::new();
        for business_type in BusinessType::ALL {
            for vat_status in VatStatus::ALL {
                let profile = BusinessProfile::new(*business_type, *vat_status);
                assert!(matcher.applies(&template(), &profile));
            }
        }
    }

    #[test]
    fn vat_restriction_excludes_exempt() {
        let matcher = ApplicabilityMatcher::new();
        let vat_only = template().for_vat_status([VatStatus::Registered]);

        let exempt = BusinessProfile::new(BusinessType::Company, VatStatus::Exempt);
        let registered = BusinessProfile::new(BusinessType::Company, VatStatus::Registered);

        assert!(!matcher.applies(&vat_only, &exempt));
        assert!(matcher.applies(&vat_only, &registered));
        assert!(matches!(
            matcher.check(&vat_only, &exempt),
            Err(Exclusion::VatStatus { actual: VatStatus::Exempt, .. })
        ));
    }

    #[test]
    fn axes_combine_with_and() {
        let matcher = ApplicabilityMatcher::new();
        let template = template()
            .for_vat_status([VatStatus::Registered, VatStatus::Pending])
            .for_business_types([BusinessType::Company]);

        let company = BusinessProfile::new(BusinessType::Company, VatStatus::Pending);
        let partnership = BusinessProfile::new(BusinessType::Partnership, VatStatus::Pending);

        assert!(matcher.applies(&template, &company));
        assert!(matches!(
            matcher.check(&template, &partnership),
            Err(Exclusion::BusinessType { .. })
        ));
    }

    #[test]
    fn industry_restriction_fails_closed_without_industry() {
        let matcher = ApplicabilityMatcher::new();
        let restricted = template().for_industries([Industry::Hospitality]);

        let no_industry = BusinessProfile::new(BusinessType::Company, VatStatus::Exempt);
        let hotel = no_industry.clone().with_industry(Industry::Hospitality);
        let shop = no_industry.clone().with_industry(Industry::Retail);

        assert!(!matcher.applies(&restricted, &no_industry));
        assert!(matcher.applies(&restricted, &hotel));
        assert!(!matcher.applies(&restricted, &shop));
        assert!(matcher.applies(&template(), &no_industry));
    }

    #[test]
    fn exclusion_display_mentions_axis() {
        let matcher = ApplicabilityMatcher::new();
        let restricted = template().for_industries([Industry::Hospitality]);
        let profile = BusinessProfile::new(BusinessType::Company, VatStatus::Exempt);

        let err = matcher.check(&restricted, &profile).unwrap_err();
        assert!(err.to_string().contains("industry"));
    }
}
