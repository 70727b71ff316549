use chrono::Datelike;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::domain::{CompanyRecord, SizeTier};
use crate::pipeline::processing::country::CountryResolver;
use crate::pipeline::processing::normalize::{DataIssue, Field, FIELD_SPECS};

/// Trait for adding derived columns to coerced company records
pub trait Enricher {
    /// Fill derived fields on every record. `columns` holds the fields that
    /// exist for the table; a derived field is added to it only when its
    /// prerequisites are all present.
    fn enrich(
        &mut self,
        records: &mut [CompanyRecord],
        columns: &mut BTreeSet<Field>,
        issues: &mut Vec<DataIssue>,
    );
}

/// Enricher computing founding year, country code, age, revenue per
/// employee and size tier
#[derive(Debug)]
pub struct DefaultEnricher {
    /// Calendar year ages are measured against
    pub reference_year: i32,
    resolver: CountryResolver,
}

impl DefaultEnricher {
    pub fn new(reference_year: i32) -> Self {
        Self {
            reference_year,
            resolver: CountryResolver::new(),
        }
    }

    fn derive(&mut self, field: Field, records: &mut [CompanyRecord], issues: &mut Vec<DataIssue>) {
        match field {
            Field::FoundingYear => {
                for record in records.iter_mut() {
                    if record.founding_year.is_none() {
                        record.founding_year = record.founding_date.map(|d| d.year());
                    }
                }
            }
            Field::CountryIso3 => {
                for (row, record) in records.iter_mut().enumerate() {
                    let Some(name) = record.country.as_deref() else {
                        continue;
                    };
                    record.country_iso3 = self.resolver.resolve(name).map(str::to_string);
                    if record.country_iso3.is_none() {
                        debug!("Row {}: no ISO code for country '{}'", row, name);
                        metrics::counter!("company_pipeline_unresolved_countries_total").increment(1);
                        issues.push(DataIssue::UnresolvableCountry {
                            row,
                            name: name.to_string(),
                        });
                    }
                }
            }
            Field::CompanyAgeYears => {
                for record in records.iter_mut() {
                    record.company_age_years = company_age(record.founding_year, self.reference_year);
                }
            }
            Field::RevenuePerEmployee => {
                for record in records.iter_mut() {
                    record.revenue_per_employee =
                        revenue_per_employee(record.annual_revenue, record.employee_count);
                }
            }
            Field::SizeTier => {
                for record in records.iter_mut() {
                    record.size_tier = record.annual_revenue.and_then(SizeTier::from_revenue);
                }
            }
            other => debug!("No derivation for {}", other),
        }
    }
}

impl Enricher for DefaultEnricher {
    fn enrich(
        &mut self,
        records: &mut [CompanyRecord],
        columns: &mut BTreeSet<Field>,
        issues: &mut Vec<DataIssue>,
    ) {
        // FIELD_SPECS is ordered so prerequisites come before dependents
        for spec in FIELD_SPECS.iter().filter(|s| s.is_derived()) {
            let missing: Vec<Field> = spec
                .requires
                .iter()
                .copied()
                .filter(|f| !columns.contains(f))
                .collect();

            if !missing.is_empty() {
                if columns.contains(&spec.field) {
                    // Read directly; nothing to fill in
                    continue;
                }
                debug!("Skipping {}: missing {:?}", spec.field, missing);
                issues.extend(missing.into_iter().map(|field| DataIssue::MissingField {
                    field,
                    needed_for: Some(spec.field),
                }));
                continue;
            }

            self.derive(spec.field, records, issues);

            if spec.field == Field::FoundingYear
                && !columns.contains(&Field::FoundingYear)
                && records.iter().all(|r| r.founding_year.is_none())
            {
                warn!("No founding date could be parsed; founding_year omitted");
                continue;
            }
            columns.insert(spec.field);
        }
    }
}

/// Revenue divided by head count; absent without both values or with zero
/// employees
pub fn revenue_per_employee(revenue: Option<f64>, employees: Option<u64>) -> Option<f64> {
    match (revenue, employees) {
        (Some(revenue), Some(employees)) if employees > 0 => Some(revenue / employees as f64),
        _ => None,
    }
}

pub fn company_age(founding_year: Option<i32>, reference_year: i32) -> Option<i32> {
    founding_year.map(|year| reference_year - year)
}
