//! Testing utilities for the Oblig workspace
//!
//! Shared fixtures: dates, profiles, templates and task histories.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use oblig_model::{
    BusinessProfile, BusinessType, Category, Industry, ObligationTemplate, Priority,
    TaskInstance, VatStatus,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Noon UTC on the given date
pub fn at(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
}

pub fn registered_company() -> BusinessProfile {
    BusinessProfile::new(BusinessType::Company, VatStatus::Registered)
        .with_industry(Industry::Retail)
}

pub fn exempt_sole_proprietor() -> BusinessProfile {
    BusinessProfile::new(BusinessType::SoleProprietor, VatStatus::Exempt)
}

pub fn monthly_template(id: &str, day: u32, category: Category) -> ObligationTemplate {
    ObligationTemplate::new(
        id,
        format!("Monthly {id}"),
        category,
        format!("FREQ=MONTHLY;BYMONTHDAY={day}"),
    )
}

pub fn yearly_template(id: &str, month: u32, day: u32, category: Category) -> ObligationTemplate {
    ObligationTemplate::new(
        id,
        format!("Yearly {id}"),
        category,
        format!("FREQ=YEARLY;BYMONTH={month};BYMONTHDAY={day}"),
    )
}

/// Small catalog covering every applicability axis
pub fn sample_catalog() -> Vec<ObligationTemplate> {
    vec![
        monthly_template("vat-return", 25, Category::Vat)
            .for_vat_status([VatStatus::Registered])
            .with_priority(Priority::High),
        monthly_template("payroll-contributions", 15, Category::SocialSecurity)
            .for_business_types([BusinessType::Company, BusinessType::Cooperative]),
        yearly_template("annual-accounts", 2, 28, Category::FinancialReports)
            .for_business_types([BusinessType::Company, BusinessType::Partnership]),
        yearly_template("food-safety-license", 6, 30, Category::License)
            .for_industries([Industry::Hospitality]),
        yearly_template("income-tax-return", 3, 15, Category::IncomeTax),
        monthly_template("retired-form", 1, Category::Other).deactivated(),
    ]
}

pub fn pending_task(due: NaiveDate, category: Category) -> TaskInstance {
    TaskInstance::ad_hoc(format!("Task due {due}"), due, category)
}

/// Task completed `days_after_due` days after its due date (negative = early)
pub fn completed_task(due: NaiveDate, days_after_due: i64, category: Category) -> TaskInstance {
    pending_task(due, category).completed(at(due + Duration::days(days_after_due)))
}

pub fn on_time_task(due: NaiveDate, category: Category) -> TaskInstance {
    completed_task(due, 0, category)
}

pub fn late_task(due: NaiveDate, days_late: i64, category: Category) -> TaskInstance {
    completed_task(due, days_late, category)
}
