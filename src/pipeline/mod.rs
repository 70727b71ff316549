//! Normalization pipeline: raw company table in, canonical table out.

pub mod processing;

use chrono::{Datelike, Utc};
use metrics::{counter, histogram};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::domain::CompanyRecord;
use crate::error::Result;
use crate::types::RawTable;
use processing::enrich::{DefaultEnricher, Enricher};
use processing::normalize::{normalize_row, ColumnMapping, DataIssue, Field, NormalizationSummary, FIELD_SPECS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Year company ages are measured against; the current UTC year when
    /// unset
    pub reference_year: Option<i32>,
}

/// The canonical company table produced by one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedTable {
    /// Canonical field names present for the table, in canonical order,
    /// followed by pass-through columns in source order
    pub columns: Vec<String>,
    pub records: Vec<CompanyRecord>,
    pub summary: NormalizationSummary,
}

impl NormalizedTable {
    pub fn has_field(&self, field: Field) -> bool {
        self.columns.iter().any(|c| c == field.name())
    }

    /// Canonical fields present, in canonical order
    pub fn fields(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| self.has_field(*f)).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One JSON object per record with exactly the table's columns. Missing
    /// cells are `null`.
    pub fn to_rows(&self) -> Vec<Map<String, Value>> {
        let layout: Vec<(&String, Option<Field>)> = self
            .columns
            .iter()
            .map(|c| (c, Field::ALL.into_iter().find(|f| f.name() == c)))
            .collect();

        self.records
            .iter()
            .map(|record| {
                layout
                    .iter()
                    .map(|(column, field)| {
                        let value = match field {
                            Some(field) => record.field_value(*field),
                            None => record.extra.get(column.as_str()).cloned().unwrap_or(Value::Null),
                        };
                        ((*column).clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

/// Renames, coerces and derives. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct CompanyPipeline {
    options: PipelineOptions,
}

impl CompanyPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn reference_year(&self) -> i32 {
        self.options.reference_year.unwrap_or_else(|| Utc::now().year())
    }

    /// Parse a JSON array of records and normalize it. Fails only when the
    /// value is not table-shaped.
    pub fn normalize_value(&self, value: &Value) -> Result<NormalizedTable> {
        let table = RawTable::from_json(value)?;
        Ok(self.normalize(&table))
    }

    #[instrument(skip(self, table), fields(rows = table.rows.len(), columns = table.columns.len()))]
    pub fn normalize(&self, table: &RawTable) -> NormalizedTable {
        let started = Instant::now();
        let mapping = ColumnMapping::resolve(&table.columns);
        let mut issues: Vec<DataIssue> = Vec::new();

        // Stage 1: rename and coerce source columns
        let mut present: BTreeSet<Field> = FIELD_SPECS
            .iter()
            .filter(|s| s.coercion.is_some() && mapping.has(s.field))
            .map(|s| s.field)
            .collect();

        if !present.contains(&Field::CompanyName) {
            warn!("No company name column among {:?}", table.columns);
            issues.push(DataIssue::MissingField {
                field: Field::CompanyName,
                needed_for: None,
            });
        }

        let mut records: Vec<CompanyRecord> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| normalize_row(row, i, &mapping, &mut issues))
            .collect();

        // Stage 2: founding year, country code and derived metrics
        let mut enricher = DefaultEnricher::new(self.reference_year());
        enricher.enrich(&mut records, &mut present, &mut issues);

        let mut columns: Vec<String> = Field::ALL
            .into_iter()
            .filter(|f| present.contains(f))
            .map(|f| f.name().to_string())
            .collect();
        columns.extend(mapping.passthrough().iter().cloned());

        let summary = NormalizationSummary {
            row_count: records.len(),
            renamed: mapping.renames(),
            passthrough: mapping.passthrough().to_vec(),
            issues,
        };

        counter!("company_pipeline_rows_total").increment(records.len() as u64);
        histogram!("company_pipeline_duration_seconds").record(started.elapsed().as_secs_f64());
        info!(
            "Normalized {} rows into {} columns ({} data issues)",
            records.len(),
            columns.len(),
            summary.issues.len()
        );

        NormalizedTable {
            columns,
            records,
            summary,
        }
    }
}
