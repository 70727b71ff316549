//! Display parameters and filtered views for the interactive dashboard.
//!
//! Everything here is recomputed from the canonical table it is handed;
//! nothing is cached between requests.

pub mod filter;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::{
    founding_trend, mean_by_sector, sector_distribution, top_by_revenue, FoundingCount, Report, SectorMean,
    SectorShare, TopCompany, DEFAULT_TOP_N,
};
use crate::domain::{CompanyRecord, SizeTier};
use crate::pipeline::NormalizedTable;

pub use filter::{CompanyFilter, Span};

const DEFAULT_REVENUE_MAX_MILLIONS: i64 = 1000;
const DEFAULT_EMPLOYEES_MAX: i64 = 500;
const DEFAULT_YEAR_MIN: i64 = 1970;
const DEFAULT_YEAR_MAX: i64 = 2025;
const AMOUNT_MARK_STEP: i64 = 100;
const YEAR_MARK_STEP: i64 = 5;
/// Upper clamp for the revenue slider, in millions
const MAX_REVENUE_MILLIONS: i64 = 1_000_000_000;
/// Marks per slider; the mark spacing widens to stay under it
const MAX_MARKS: i64 = 20;
const PALETTE_SATURATION: f64 = 0.7;
const PALETTE_VALUE: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderMark {
    pub value: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderBounds {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub marks: Vec<SliderMark>,
}

impl SliderBounds {
    /// Marks from `min` while below `end`, every `step` or a multiple of it
    /// so that at most `MAX_MARKS` are produced
    fn with_marks(min: i64, max: i64, end: i64, step: i64, suffix: &str) -> Self {
        let step = step.max(1);
        let span = (i128::from(end) - i128::from(min)).max(0);
        let per_mark = i128::from(step) * i128::from(MAX_MARKS);
        let mark_step = i128::from(step) * ((span + per_mark - 1) / per_mark).max(1);

        let marks = (0..MAX_MARKS)
            .map(|k| i128::from(min) + i128::from(k) * mark_step)
            .take_while(|value| *value < i128::from(end))
            .filter_map(|value| i64::try_from(value).ok())
            .map(|value| SliderMark {
                value,
                label: format!("{value}{suffix}"),
            })
            .collect();
        Self { min, max, step, marks }
    }
}

/// Actual value ranges in the table, unclamped
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataExtents {
    /// Annual revenue in millions
    pub revenue_millions: Option<Span<f64>>,
    pub employees: Option<Span<u64>>,
    pub founding_years: Option<Span<i32>>,
}

impl DataExtents {
    pub fn from_records(records: &[CompanyRecord]) -> Self {
        fn extent<T: PartialOrd + Copy>(values: impl Iterator<Item = T>) -> Option<Span<T>> {
            values.fold(None, |acc: Option<Span<T>>, v| match acc {
                None => Some(Span::new(v, v)),
                Some(span) => Some(Span::new(
                    if v < span.min { v } else { span.min },
                    if v > span.max { v } else { span.max },
                )),
            })
        }
        Self {
            revenue_millions: extent(records.iter().filter_map(|r| r.annual_revenue).map(|v| v / 1e6)),
            employees: extent(records.iter().filter_map(|r| r.employee_count)),
            founding_years: extent(records.iter().filter_map(|r| r.founding_year)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorColor {
    pub sector: String,
    pub color: String,
}

/// Display parameters derived from a canonical table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardParams {
    /// Sectors in first-seen order with their chart colour
    pub sector_colors: Vec<SectorColor>,
    /// Revenue slider, in millions
    pub revenue_millions: SliderBounds,
    pub employees: SliderBounds,
    pub founding_years: SliderBounds,
    /// Tiers present in the data, in tier order
    pub tiers: Vec<SizeTier>,
    pub total_companies: usize,
    pub extents: DataExtents,
}

impl DashboardParams {
    pub fn from_table(table: &NormalizedTable) -> Self {
        let records = &table.records;

        let mut sectors: Vec<&str> = Vec::new();
        for sector in records.iter().filter_map(|r| r.sector.as_deref()) {
            if !sectors.contains(&sector) {
                sectors.push(sector);
            }
        }
        let sector_colors = sectors
            .iter()
            .zip(palette(sectors.len()))
            .map(|(sector, color)| SectorColor {
                sector: sector.to_string(),
                color,
            })
            .collect();

        let extents = DataExtents::from_records(records);

        let revenue_max = extents
            .revenue_millions
            .map(|span| span.max.ceil().clamp(0.0, MAX_REVENUE_MILLIONS as f64) as i64)
            .unwrap_or(DEFAULT_REVENUE_MAX_MILLIONS);

        let employees_max = extents
            .employees
            .map(|span| i64::try_from(span.max).unwrap_or(i64::MAX))
            .unwrap_or(DEFAULT_EMPLOYEES_MAX);

        let (year_min, year_max) = extents
            .founding_years
            .map(|span| (i64::from(span.min), i64::from(span.max)))
            .unwrap_or((DEFAULT_YEAR_MIN, DEFAULT_YEAR_MAX));

        let tiers = SizeTier::ALL
            .into_iter()
            .filter(|t| records.iter().any(|r| r.size_tier == Some(*t)))
            .collect();

        Self {
            sector_colors,
            revenue_millions: SliderBounds::with_marks(
                0,
                revenue_max,
                revenue_max.saturating_add(AMOUNT_MARK_STEP),
                AMOUNT_MARK_STEP,
                "M",
            ),
            employees: SliderBounds::with_marks(
                0,
                employees_max,
                employees_max.saturating_add(AMOUNT_MARK_STEP),
                AMOUNT_MARK_STEP,
                "",
            ),
            founding_years: SliderBounds::with_marks(year_min, year_max, year_max + 1, YEAR_MARK_STEP, ""),
            tiers,
            total_companies: records.len(),
            extents,
        }
    }

    pub fn color_for(&self, sector: &str) -> Option<&str> {
        self.sector_colors
            .iter()
            .find(|c| c.sector == sector)
            .map(|c| c.color.as_str())
    }
}

/// `n` evenly spaced hues at fixed saturation and value, as `#rrggbb`
pub fn palette(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let (r, g, b) = hsv_to_rgb(i as f64 / n as f64, PALETTE_SATURATION, PALETTE_VALUE);
            format!(
                "#{:02x}{:02x}{:02x}",
                (r * 255.0) as u8,
                (g * 255.0) as u8,
                (b * 255.0) as u8
            )
        })
        .collect()
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Headline numbers for the current selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub matched: usize,
    pub total: usize,
    pub share_percent: f64,
    pub total_revenue: f64,
    pub total_employees: u64,
    pub mean_employees: Option<f64>,
    pub distinct_sectors: usize,
    pub founding_year_span: Option<Span<i32>>,
}

impl SelectionSummary {
    pub fn from_selection(selected: &[&CompanyRecord], total: usize) -> Self {
        let employees: Vec<u64> = selected.iter().filter_map(|r| r.employee_count).collect();
        let mut sectors: Vec<&str> = selected.iter().filter_map(|r| r.sector.as_deref()).collect();
        sectors.sort_unstable();
        sectors.dedup();
        let years: Vec<i32> = selected.iter().filter_map(|r| r.founding_year).collect();

        Self {
            matched: selected.len(),
            total,
            share_percent: if total == 0 {
                0.0
            } else {
                selected.len() as f64 / total as f64 * 100.0
            },
            total_revenue: selected.iter().filter_map(|r| r.annual_revenue).sum(),
            total_employees: employees.iter().sum(),
            mean_employees: (!employees.is_empty())
                .then(|| employees.iter().sum::<u64>() as f64 / employees.len() as f64),
            distinct_sectors: sectors.len(),
            founding_year_span: match (years.iter().min(), years.iter().max()) {
                (Some(min), Some(max)) => Some(Span::new(*min, *max)),
                _ => None,
            },
        }
    }
}

/// Everything the dashboard shows for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: SelectionSummary,
    pub sector_distribution: Vec<SectorShare>,
    pub revenue_by_sector: Vec<SectorMean>,
    pub employees_by_sector: Vec<SectorMean>,
    pub founding_trend: Vec<FoundingCount>,
    pub top_companies: Vec<TopCompany>,
    /// Selected rows with the table's columns
    pub rows: Vec<Map<String, Value>>,
}

impl DashboardView {
    pub fn build(table: &NormalizedTable, filter: &CompanyFilter) -> Self {
        let selected_refs = filter.apply(table);
        let selected: Vec<CompanyRecord> = selected_refs.iter().map(|r| (*r).clone()).collect();
        let top_n = if filter.top_n == 0 { DEFAULT_TOP_N } else { filter.top_n };

        let subset = NormalizedTable {
            columns: table.columns.clone(),
            records: selected,
            summary: Default::default(),
        };

        Self {
            summary: SelectionSummary::from_selection(&selected_refs, table.len()),
            sector_distribution: sector_distribution(&subset.records),
            revenue_by_sector: mean_by_sector(&subset.records, |r| r.annual_revenue),
            employees_by_sector: mean_by_sector(&subset.records, |r| r.employee_count.map(|e| e as f64)),
            founding_trend: founding_trend(&subset.records),
            top_companies: top_by_revenue(&subset.records, top_n),
            rows: subset.to_rows(),
        }
    }
}

/// Everything the HTTP layer serves, built once from a canonical table
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub table: NormalizedTable,
    pub params: DashboardParams,
    pub report: Report,
}

impl DashboardState {
    pub fn new(table: NormalizedTable) -> Self {
        let params = DashboardParams::from_table(&table);
        let report = Report::build(&table, DEFAULT_TOP_N);
        Self { table, params, report }
    }
}
