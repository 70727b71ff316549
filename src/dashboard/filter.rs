use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::DashboardParams;
use crate::analysis::DEFAULT_TOP_N;
use crate::domain::{CompanyRecord, SizeTier};
use crate::pipeline::processing::normalize::Field;
use crate::pipeline::NormalizedTable;

/// Closed numeric interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Span<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Dashboard selection. Empty `sectors` / `tiers` and `None` spans do not
/// constrain anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFilter {
    #[serde(default)]
    pub sectors: Vec<String>,
    /// Annual revenue in millions
    pub revenue_millions: Option<Span<f64>>,
    pub employees: Option<Span<u64>>,
    pub founding_years: Option<Span<i32>>,
    #[serde(default)]
    pub tiers: Vec<SizeTier>,
    pub top_n: usize,
}

impl Default for CompanyFilter {
    fn default() -> Self {
        Self {
            sectors: Vec::new(),
            revenue_millions: None,
            employees: None,
            founding_years: None,
            tiers: Vec::new(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl CompanyFilter {
    /// The selection that shows everything: full slider ranges, widened to
    /// the data extents where a slider is clamped, and every tier checked
    pub fn reset(params: &DashboardParams) -> Self {
        let extents = &params.extents;

        let mut revenue = Span::new(
            params.revenue_millions.min as f64,
            params.revenue_millions.max as f64,
        );
        if let Some(actual) = extents.revenue_millions {
            revenue = Span::new(revenue.min.min(actual.min), revenue.max.max(actual.max));
        }

        let mut employees = Span::new(
            u64::try_from(params.employees.min).unwrap_or(0),
            u64::try_from(params.employees.max).unwrap_or(0),
        );
        if let Some(actual) = extents.employees {
            employees = Span::new(employees.min.min(actual.min), employees.max.max(actual.max));
        }

        let clamp_year = |year: i64| year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let mut years = Span::new(
            clamp_year(params.founding_years.min),
            clamp_year(params.founding_years.max),
        );
        if let Some(actual) = extents.founding_years {
            years = Span::new(years.min.min(actual.min), years.max.max(actual.max));
        }

        Self {
            sectors: Vec::new(),
            revenue_millions: Some(revenue),
            employees: Some(employees),
            founding_years: Some(years),
            tiers: params.tiers.clone(),
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Records matching every constraint whose column exists in the table.
    /// A record with a missing value in a constrained column is excluded.
    pub fn apply<'a>(&self, table: &'a NormalizedTable) -> Vec<&'a CompanyRecord> {
        let sectors: BTreeSet<&str> = self.sectors.iter().map(String::as_str).collect();
        let check_sector = !sectors.is_empty() && table.has_field(Field::Sector);
        let check_tier = !self.tiers.is_empty() && table.has_field(Field::SizeTier);
        let revenue = self.revenue_millions.filter(|_| table.has_field(Field::AnnualRevenue));
        let employees = self.employees.filter(|_| table.has_field(Field::EmployeeCount));
        let years = self.founding_years.filter(|_| table.has_field(Field::FoundingYear));

        table
            .records
            .iter()
            .filter(|r| {
                !check_sector || r.sector.as_deref().map_or(false, |s| sectors.contains(s))
            })
            .filter(|r| {
                revenue.map_or(true, |span| {
                    r.annual_revenue
                        .map_or(false, |v| span.contains(v / 1e6))
                })
            })
            .filter(|r| employees.map_or(true, |span| r.employee_count.map_or(false, |v| span.contains(v))))
            .filter(|r| years.map_or(true, |span| r.founding_year.map_or(false, |v| span.contains(v))))
            .filter(|r| !check_tier || r.size_tier.map_or(false, |t| self.tiers.contains(&t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{CompanyPipeline, PipelineOptions};
    use serde_json::json;

    fn table() -> NormalizedTable {
        CompanyPipeline::new(PipelineOptions {
            reference_year: Some(2025),
        })
        .normalize_value(&json!([
            {"Company": "A", "Sector": "Finance", "Revenue": 5_000_000.0, "Employees": 10, "Founding Year": 1990},
            {"Company": "B", "Sector": "Technology", "Revenue": 700_000_000.0, "Employees": 400, "Founding Year": 2010},
            {"Company": "C", "Sector": "Finance", "Revenue": null, "Employees": 50, "Founding Year": 2000}
        ]))
        .unwrap()
    }

    fn names(records: &[&CompanyRecord]) -> Vec<String> {
        records.iter().filter_map(|r| r.company_name.clone()).collect()
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let table = table();
        assert_eq!(CompanyFilter::default().apply(&table).len(), 3);
    }

    #[test]
    fn test_reset_excludes_rows_missing_a_constrained_value() {
        let table = table();
        let params = DashboardParams::from_table(&table);
        let filter = CompanyFilter::reset(&params);
        assert_eq!(names(&filter.apply(&table)), vec!["A", "B"]);
    }

    #[test]
    fn test_reset_keeps_top_revenue_below_half_a_million_fraction() {
        let table = CompanyPipeline::default()
            .normalize_value(&json!([
                {"Company": "Big", "Revenue": 249_400_000.0},
                {"Company": "Small", "Revenue": 5_000_000.0}
            ]))
            .unwrap();
        let params = DashboardParams::from_table(&table);
        assert_eq!(params.revenue_millions.max, 250);
        assert_eq!(CompanyFilter::reset(&params).apply(&table).len(), 2);
    }

    #[test]
    fn test_reset_covers_values_beyond_clamped_sliders() {
        let table = CompanyPipeline::default()
            .normalize_value(&json!([
                {"Company": "Huge", "Revenue": 1e30, "Employees": 9_000_000_000_000_000_000u64},
                {"Company": "Tiny", "Revenue": 2_500_000.0, "Employees": 3}
            ]))
            .unwrap();
        let params = DashboardParams::from_table(&table);
        assert_eq!(CompanyFilter::reset(&params).apply(&table).len(), 2);
    }

    #[test]
    fn test_sector_and_range_constraints() {
        let table = table();
        let filter = CompanyFilter {
            sectors: vec!["Finance".into()],
            employees: Some(Span::new(0, 100)),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&table)), vec!["A", "C"]);

        let filter = CompanyFilter {
            revenue_millions: Some(Span::new(100.0, 1000.0)),
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&table)), vec!["B"]);

        let filter = CompanyFilter {
            tiers: vec![SizeTier::Micro],
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&table)), vec!["A"]);
    }

    #[test]
    fn test_constraints_on_absent_columns_are_ignored() {
        let table = CompanyPipeline::default()
            .normalize_value(&json!([{"Company": "Solo"}]))
            .unwrap();
        let filter = CompanyFilter {
            sectors: vec!["Finance".into()],
            revenue_millions: Some(Span::new(0.0, 1.0)),
            founding_years: Some(Span::new(1990, 2000)),
            tiers: vec![SizeTier::Large],
            ..Default::default()
        };
        assert_eq!(filter.apply(&table).len(), 1);
    }
}
