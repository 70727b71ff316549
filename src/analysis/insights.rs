use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{mean_by_sector, sector_counts};
use crate::domain::CompanyRecord;

/// How many of the most recent distinct founding years count as "recent"
const RECENT_YEARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    MostProfitableSector,
    PredominantSector,
    MostEfficientSector,
    GrowthSector,
    GeographicConcentration,
}

/// One automatically derived observation about the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    /// The sector or country the insight is about
    pub subject: String,
    /// The headline number (mean revenue, count, ...)
    pub value: f64,
    /// Share of all companies, in percent, where it applies
    pub share: Option<f64>,
    pub message: String,
}

/// Every insight the records support. An insight whose inputs are missing
/// is skipped.
pub fn generate_insights(records: &[CompanyRecord]) -> Vec<Insight> {
    [
        most_profitable_sector(records),
        predominant_sector(records),
        most_efficient_sector(records),
        growth_sector(records),
        geographic_concentration(records),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn share(count: usize, total: usize) -> f64 {
    count as f64 / total.max(1) as f64 * 100.0
}

pub fn most_profitable_sector(records: &[CompanyRecord]) -> Option<Insight> {
    let best = mean_by_sector(records, |r| r.annual_revenue).into_iter().next()?;
    Some(Insight {
        kind: InsightKind::MostProfitableSector,
        message: format!(
            "{} has the highest mean annual revenue ({:.2} million).",
            best.sector,
            best.mean / 1e6
        ),
        subject: best.sector,
        value: best.mean,
        share: None,
    })
}

pub fn predominant_sector(records: &[CompanyRecord]) -> Option<Insight> {
    let (sector, count) = sector_counts(records).into_iter().next()?;
    let share = share(count, records.len());
    Some(Insight {
        kind: InsightKind::PredominantSector,
        message: format!(
            "{} has the most companies ({}), {:.1}% of the total.",
            sector, count, share
        ),
        subject: sector,
        value: count as f64,
        share: Some(share),
    })
}

pub fn most_efficient_sector(records: &[CompanyRecord]) -> Option<Insight> {
    let best = mean_by_sector(records, |r| r.revenue_per_employee).into_iter().next()?;
    Some(Insight {
        kind: InsightKind::MostEfficientSector,
        message: format!(
            "{} has the highest revenue per employee ({:.2} thousand per employee).",
            best.sector,
            best.mean / 1e3
        ),
        subject: best.sector,
        value: best.mean,
        share: None,
    })
}

/// Sector with the most companies founded in the last five distinct
/// founding years present in the data
pub fn growth_sector(records: &[CompanyRecord]) -> Option<Insight> {
    let mut years: Vec<i32> = records.iter().filter_map(|r| r.founding_year).collect();
    years.sort_unstable();
    years.dedup();
    let threshold = *years.iter().rev().take(RECENT_YEARS).last()?;

    let recent: Vec<CompanyRecord> = records
        .iter()
        .filter(|r| r.founding_year.map_or(false, |y| y >= threshold))
        .cloned()
        .collect();
    let (sector, count) = sector_counts(&recent).into_iter().next()?;
    Some(Insight {
        kind: InsightKind::GrowthSector,
        message: format!(
            "{} leads new companies founded since {} ({}), suggesting expansion.",
            sector, threshold, count
        ),
        subject: sector,
        value: count as f64,
        share: Some(share(count, recent.len())),
    })
}

pub fn geographic_concentration(records: &[CompanyRecord]) -> Option<Insight> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for country in records.iter().filter_map(|r| r.country.as_deref()) {
        *counts.entry(country).or_default() += 1;
    }
    // BTreeMap order makes ties resolve alphabetically
    let (country, count) = counts
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (c, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((c, n)),
        })?;
    let share = share(count, records.len());
    Some(Insight {
        kind: InsightKind::GeographicConcentration,
        message: format!(
            "{} has the most companies ({}), {:.1}% of the total.",
            country, count, share
        ),
        subject: country.to_string(),
        value: count as f64,
        share: Some(share),
    })
}
