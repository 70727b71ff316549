use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::pipeline::processing::normalize::Field;
use crate::types::RawRecord;

/// Revenue-based size classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeTier {
    Micro,
    Small,
    Medium,
    Large,
    Corporation,
}

const TEN_MILLION: f64 = 10_000_000.0;
const HUNDRED_MILLION: f64 = 100_000_000.0;
const FIVE_HUNDRED_MILLION: f64 = 500_000_000.0;
const ONE_BILLION: f64 = 1_000_000_000.0;

impl SizeTier {
    /// Tiers in ascending revenue order
    pub const ALL: [SizeTier; 5] = [
        SizeTier::Micro,
        SizeTier::Small,
        SizeTier::Medium,
        SizeTier::Large,
        SizeTier::Corporation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SizeTier::Micro => "Micro",
            SizeTier::Small => "Small",
            SizeTier::Medium => "Medium",
            SizeTier::Large => "Large",
            SizeTier::Corporation => "Corporation",
        }
    }

    /// Half-open bounds: [0, 10M) Micro, [10M, 100M) Small, [100M, 500M)
    /// Medium, [500M, 1B) Large, [1B, inf) Corporation. Negative or
    /// non-finite revenue has no tier.
    pub fn from_revenue(revenue: f64) -> Option<SizeTier> {
        if !revenue.is_finite() || revenue < 0.0 {
            return None;
        }
        let tier = if revenue < TEN_MILLION {
            SizeTier::Micro
        } else if revenue < HUNDRED_MILLION {
            SizeTier::Small
        } else if revenue < FIVE_HUNDRED_MILLION {
            SizeTier::Medium
        } else if revenue < ONE_BILLION {
            SizeTier::Large
        } else {
            SizeTier::Corporation
        };
        Some(tier)
    }

    pub fn from_label(label: &str) -> Option<SizeTier> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A company row after renaming, coercion and derivation.
///
/// Every canonical attribute is optional per row; which attributes exist for
/// the table as a whole is tracked by `NormalizedTable::columns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: Option<String>,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub annual_revenue: Option<f64>,
    pub employee_count: Option<u64>,
    pub country: Option<String>,
    pub country_iso3: Option<String>,
    pub founding_date: Option<NaiveDate>,
    pub founding_year: Option<i32>,
    pub company_age_years: Option<i32>,
    pub revenue_per_employee: Option<f64>,
    pub size_tier: Option<SizeTier>,
    /// Unrecognized source columns, carried through untouched
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: RawRecord,
}

impl CompanyRecord {
    /// JSON value of one canonical attribute, `null` when missing
    pub fn field_value(&self, field: Field) -> Value {
        match field {
            Field::Id => json!(self.id),
            Field::CompanyName => json!(self.company_name),
            Field::Sector => json!(self.sector),
            Field::AnnualRevenue => json!(self.annual_revenue),
            Field::EmployeeCount => json!(self.employee_count),
            Field::Country => json!(self.country),
            Field::CountryIso3 => json!(self.country_iso3),
            Field::FoundingDate => json!(self.founding_date.map(|d| d.format("%Y-%m-%d").to_string())),
            Field::FoundingYear => json!(self.founding_year),
            Field::CompanyAgeYears => json!(self.company_age_years),
            Field::RevenuePerEmployee => json!(self.revenue_per_employee),
            Field::SizeTier => json!(self.size_tier.map(SizeTier::label)),
        }
    }

    /// Numeric view of a field for statistics; `None` for text fields
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::AnnualRevenue => self.annual_revenue,
            Field::EmployeeCount => self.employee_count.map(|v| v as f64),
            Field::FoundingYear => self.founding_year.map(f64::from),
            Field::CompanyAgeYears => self.company_age_years.map(f64::from),
            Field::RevenuePerEmployee => self.revenue_per_employee,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(SizeTier::from_revenue(0.0), Some(SizeTier::Micro));
        assert_eq!(SizeTier::from_revenue(9_999_999.0), Some(SizeTier::Micro));
        assert_eq!(SizeTier::from_revenue(10_000_000.0), Some(SizeTier::Small));
        assert_eq!(SizeTier::from_revenue(99_999_999.99), Some(SizeTier::Small));
        assert_eq!(SizeTier::from_revenue(100_000_000.0), Some(SizeTier::Medium));
        assert_eq!(SizeTier::from_revenue(500_000_000.0), Some(SizeTier::Large));
        assert_eq!(SizeTier::from_revenue(999_999_999.0), Some(SizeTier::Large));
        assert_eq!(SizeTier::from_revenue(1_000_000_000.0), Some(SizeTier::Corporation));
    }

    #[test]
    fn test_negative_or_non_finite_revenue_has_no_tier() {
        assert_eq!(SizeTier::from_revenue(-1.0), None);
        assert_eq!(SizeTier::from_revenue(f64::NAN), None);
        assert_eq!(SizeTier::from_revenue(f64::INFINITY), None);
    }

    #[test]
    fn test_tier_serializes_as_label() {
        assert_eq!(serde_json::to_value(SizeTier::Corporation).unwrap(), json!("Corporation"));
        assert_eq!(SizeTier::from_label(" medium "), Some(SizeTier::Medium));
        assert_eq!(SizeTier::from_label("Huge"), None);
    }

    #[test]
    fn test_field_value_renders_nulls_and_dates() {
        let record = CompanyRecord {
            company_name: Some("Acme".into()),
            founding_date: NaiveDate::from_ymd_opt(2001, 2, 3),
            size_tier: Some(SizeTier::Small),
            ..Default::default()
        };
        assert_eq!(record.field_value(Field::CompanyName), json!("Acme"));
        assert_eq!(record.field_value(Field::FoundingDate), json!("2001-02-03"));
        assert_eq!(record.field_value(Field::SizeTier), json!("Small"));
        assert_eq!(record.field_value(Field::AnnualRevenue), Value::Null);
    }
}
