//! Aggregate statistics and the batch report over a canonical table.

pub mod insights;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::{CompanyRecord, SizeTier};
use crate::error::Result;
use crate::pipeline::processing::normalize::Field;
use crate::pipeline::NormalizedTable;

pub use insights::{generate_insights, Insight, InsightKind};

/// Default number of companies in the top-by-revenue list
pub const DEFAULT_TOP_N: usize = 10;

/// Numeric columns considered for the correlation matrix
pub const CORRELATION_FIELDS: [Field; 5] = [
    Field::AnnualRevenue,
    Field::EmployeeCount,
    Field::FoundingYear,
    Field::CompanyAgeYears,
    Field::RevenuePerEmployee,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorShare {
    pub sector: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorMean {
    pub sector: String,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundingCount {
    pub year: i32,
    pub sector: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCompany {
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub annual_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryAggregate {
    pub country: String,
    pub country_iso3: Option<String>,
    pub company_count: usize,
    pub revenue_total: f64,
    pub employee_total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierShare {
    pub tier: SizeTier,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierMean {
    pub tier: SizeTier,
    pub mean_revenue: f64,
}

/// Pairwise Pearson correlation. A cell is `None` when fewer than two rows
/// have both values or either column is constant over those rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub fields: Vec<Field>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Field, b: Field) -> Option<f64> {
        let i = self.fields.iter().position(|f| *f == a)?;
        let j = self.fields.iter().position(|f| *f == b)?;
        self.values[i][j]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_companies: usize,
    pub total_revenue: f64,
    pub total_employees: u64,
    pub mean_revenue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub summary: SummaryMetrics,
    pub sector_distribution: Vec<SectorShare>,
    pub revenue_by_sector: Vec<SectorMean>,
    pub employees_by_sector: Vec<SectorMean>,
    pub founding_trend: Vec<FoundingCount>,
    pub top_companies: Vec<TopCompany>,
    pub countries: Vec<CountryAggregate>,
    pub tier_distribution: Vec<TierShare>,
    pub revenue_by_tier: Vec<TierMean>,
    pub correlation: CorrelationMatrix,
    pub insights: Vec<Insight>,
    pub data_issue_count: usize,
}

impl Report {
    pub fn build(table: &NormalizedTable, top_n: usize) -> Self {
        let records = &table.records;
        let numeric: Vec<Field> = CORRELATION_FIELDS
            .into_iter()
            .filter(|f| table.has_field(*f))
            .collect();

        Self {
            generated_at: Utc::now(),
            summary: summary_metrics(records),
            sector_distribution: sector_distribution(records),
            revenue_by_sector: mean_by_sector(records, |r| r.annual_revenue),
            employees_by_sector: mean_by_sector(records, |r| r.employee_count.map(|e| e as f64)),
            founding_trend: founding_trend(records),
            top_companies: top_by_revenue(records, top_n),
            countries: country_aggregates(records),
            tier_distribution: tier_distribution(records),
            revenue_by_tier: revenue_by_tier(records),
            correlation: correlation_matrix(records, &numeric),
            insights: generate_insights(records),
            data_issue_count: table.summary.issues.len(),
        }
    }

    /// Write the report as `report_<timestamp>.json` under `output_dir`
    pub fn write_report(&self, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)?;

        let timestamp = self.generated_at.format("%Y%m%d_%H%M%S");
        let filepath = output_dir.join(format!("report_{timestamp}.json"));

        let json_content = serde_json::to_string_pretty(self)?;
        fs::write(&filepath, json_content)?;

        info!("Report written to {}", filepath.display());
        Ok(filepath)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn summary_metrics(records: &[CompanyRecord]) -> SummaryMetrics {
    let revenues: Vec<f64> = records.iter().filter_map(|r| r.annual_revenue).collect();
    let total_revenue: f64 = revenues.iter().sum();
    SummaryMetrics {
        total_companies: records.len(),
        total_revenue,
        total_employees: records.iter().filter_map(|r| r.employee_count).sum(),
        mean_revenue: (!revenues.is_empty()).then(|| total_revenue / revenues.len() as f64),
    }
}

/// Count per sector, most common first
pub fn sector_counts(records: &[CompanyRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for sector in records.iter().filter_map(|r| r.sector.as_deref()) {
        *counts.entry(sector).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().map(|(s, n)| (s.to_string(), n)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

pub fn sector_distribution(records: &[CompanyRecord]) -> Vec<SectorShare> {
    let counts = sector_counts(records);
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .into_iter()
        .map(|(sector, count)| SectorShare {
            sector,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// Mean of `value` per sector, highest first. Sectors with no values are
/// left out.
pub fn mean_by_sector<F>(records: &[CompanyRecord], value: F) -> Vec<SectorMean>
where
    F: Fn(&CompanyRecord) -> Option<f64>,
{
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in records {
        if let (Some(sector), Some(v)) = (record.sector.as_deref(), value(record)) {
            let slot = sums.entry(sector).or_default();
            slot.0 += v;
            slot.1 += 1;
        }
    }
    let mut means: Vec<SectorMean> = sums
        .into_iter()
        .map(|(sector, (sum, n))| SectorMean {
            sector: sector.to_string(),
            mean: sum / n as f64,
        })
        .collect();
    means.sort_by(|a, b| b.mean.total_cmp(&a.mean).then_with(|| a.sector.cmp(&b.sector)));
    means
}

pub fn founding_trend(records: &[CompanyRecord]) -> Vec<FoundingCount> {
    let mut counts: BTreeMap<(i32, &str), usize> = BTreeMap::new();
    for record in records {
        if let (Some(year), Some(sector)) = (record.founding_year, record.sector.as_deref()) {
            *counts.entry((year, sector)).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|((year, sector), count)| FoundingCount {
            year,
            sector: sector.to_string(),
            count,
        })
        .collect()
}

pub fn top_by_revenue(records: &[CompanyRecord], n: usize) -> Vec<TopCompany> {
    let mut ranked: Vec<&CompanyRecord> = records.iter().filter(|r| r.annual_revenue.is_some()).collect();
    ranked.sort_by(|a, b| {
        let (ra, rb) = (a.annual_revenue.unwrap_or_default(), b.annual_revenue.unwrap_or_default());
        rb.total_cmp(&ra).then_with(|| a.company_name.cmp(&b.company_name))
    });
    ranked
        .into_iter()
        .take(n)
        .map(|r| TopCompany {
            company_name: r.company_name.clone(),
            sector: r.sector.clone(),
            annual_revenue: r.annual_revenue.unwrap_or_default(),
        })
        .collect()
}

/// Per-country totals, most companies first
pub fn country_aggregates(records: &[CompanyRecord]) -> Vec<CountryAggregate> {
    let mut by_country: HashMap<&str, CountryAggregate> = HashMap::new();
    for record in records {
        let Some(country) = record.country.as_deref() else {
            continue;
        };
        let entry = by_country.entry(country).or_insert_with(|| CountryAggregate {
            country: country.to_string(),
            country_iso3: None,
            company_count: 0,
            revenue_total: 0.0,
            employee_total: 0,
        });
        entry.company_count += 1;
        entry.revenue_total += record.annual_revenue.unwrap_or_default();
        entry.employee_total += record.employee_count.unwrap_or_default();
        if entry.country_iso3.is_none() {
            entry.country_iso3 = record.country_iso3.clone();
        }
    }
    let mut aggregates: Vec<CountryAggregate> = by_country.into_values().collect();
    aggregates.sort_by(|a, b| {
        b.company_count
            .cmp(&a.company_count)
            .then_with(|| a.country.cmp(&b.country))
    });
    aggregates
}

/// Tier counts in tier order; tiers with no companies are left out
pub fn tier_distribution(records: &[CompanyRecord]) -> Vec<TierShare> {
    let tiered: Vec<SizeTier> = records.iter().filter_map(|r| r.size_tier).collect();
    SizeTier::ALL
        .into_iter()
        .map(|tier| (tier, tiered.iter().filter(|t| **t == tier).count()))
        .filter(|(_, count)| *count > 0)
        .map(|(tier, count)| TierShare {
            tier,
            count,
            percentage: percentage(count, tiered.len()),
        })
        .collect()
}

pub fn revenue_by_tier(records: &[CompanyRecord]) -> Vec<TierMean> {
    SizeTier::ALL
        .into_iter()
        .filter_map(|tier| {
            let revenues: Vec<f64> = records
                .iter()
                .filter(|r| r.size_tier == Some(tier))
                .filter_map(|r| r.annual_revenue)
                .collect();
            (!revenues.is_empty()).then(|| TierMean {
                tier,
                mean_revenue: revenues.iter().sum::<f64>() / revenues.len() as f64,
            })
        })
        .collect()
}

/// Pearson correlation over rows where both values are present
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

pub fn correlation_matrix(records: &[CompanyRecord], fields: &[Field]) -> CorrelationMatrix {
    let values = fields
        .iter()
        .map(|a| {
            fields
                .iter()
                .map(|b| {
                    let pairs: Vec<(f64, f64)> = records
                        .iter()
                        .filter_map(|r| Some((r.numeric(*a)?, r.numeric(*b)?)))
                        .collect();
                    pearson(&pairs)
                })
                .collect()
        })
        .collect();
    CorrelationMatrix {
        fields: fields.to_vec(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str, sector: &str, revenue: f64, employees: u64, year: i32) -> CompanyRecord {
        CompanyRecord {
            company_name: Some(name.into()),
            sector: Some(sector.into()),
            annual_revenue: Some(revenue),
            employee_count: Some(employees),
            founding_year: Some(year),
            size_tier: SizeTier::from_revenue(revenue),
            ..Default::default()
        }
    }

    fn sample() -> Vec<CompanyRecord> {
        vec![
            company("A", "Finance", 300_000_000.0, 100, 2000),
            company("B", "Finance", 100_000_000.0, 300, 2010),
            company("C", "Education", 5_000_000.0, 50, 2010),
            CompanyRecord {
                company_name: Some("D".into()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_sector_distribution_and_means() {
        let records = sample();
        let shares = sector_distribution(&records);
        assert_eq!(shares[0].sector, "Finance");
        assert_eq!(shares[0].count, 2);
        assert!((shares[0].percentage - 66.666).abs() < 0.01);

        let revenue = mean_by_sector(&records, |r| r.annual_revenue);
        assert_eq!(revenue[0], SectorMean { sector: "Finance".into(), mean: 200_000_000.0 });
        assert_eq!(revenue[1].sector, "Education");
    }

    #[test]
    fn test_top_by_revenue_skips_missing() {
        let top = top_by_revenue(&sample(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].company_name.as_deref(), Some("A"));
        assert_eq!(top[1].company_name.as_deref(), Some("B"));
    }

    #[test]
    fn test_tiers_in_order() {
        let tiers = tier_distribution(&sample());
        let order: Vec<SizeTier> = tiers.iter().map(|t| t.tier).collect();
        assert_eq!(order, vec![SizeTier::Micro, SizeTier::Medium]);
        assert_eq!(tiers[1].count, 2);
    }

    #[test]
    fn test_pearson() {
        let perfect = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        assert!((pearson(&perfect).unwrap() - 1.0).abs() < 1e-12);
        let inverse = [(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)];
        assert!((pearson(&inverse).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&[(1.0, 1.0)]), None);
        assert_eq!(pearson(&[(1.0, 1.0), (2.0, 1.0)]), None);
    }

    #[test]
    fn test_correlation_matrix_is_symmetric() {
        let fields = [Field::AnnualRevenue, Field::EmployeeCount, Field::FoundingYear];
        let matrix = correlation_matrix(&sample(), &fields);
        for a in fields {
            assert_eq!(matrix.get(a, a).map(|v| (v - 1.0).abs() < 1e-12), Some(true));
            for b in fields {
                assert_eq!(matrix.get(a, b), matrix.get(b, a));
            }
        }
    }

    #[test]
    fn test_summary_metrics() {
        let summary = summary_metrics(&sample());
        assert_eq!(summary.total_companies, 4);
        assert_eq!(summary.total_employees, 450);
        assert_eq!(summary.total_revenue, 405_000_000.0);
        assert_eq!(summary.mean_revenue, Some(135_000_000.0));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let table = NormalizedTable {
            columns: vec!["company_name".into(), "annual_revenue".into()],
            records: sample(),
            ..Default::default()
        };
        let report = Report::build(&table, DEFAULT_TOP_N);
        let path = report.write_report(dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("report_") && name.ends_with(".json"));

        let back: Report = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.summary, report.summary);
        assert_eq!(back.correlation.fields, vec![Field::AnnualRevenue]);
    }
}
