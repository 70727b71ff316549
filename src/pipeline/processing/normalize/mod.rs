//! Column renaming and per-cell coercion into canonical company records.

pub mod coerce;
pub mod schema;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::CompanyRecord;
use crate::types::RawRecord;

pub use coerce::{coerce, parse_date, parse_localized_number, CellValue, Coerced};
pub use schema::{Coercion, Field, FieldSpec, FIELD_SPECS};

/// A data-quality observation. Issues never abort a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    /// A column is absent for the whole table. `needed_for` names the
    /// derived field that was omitted because of it.
    MissingField {
        field: Field,
        needed_for: Option<Field>,
    },
    /// One cell had content its coercion could not read
    UnparseableValue { row: usize, field: Field, raw: Value },
    /// A country name with no ISO match
    UnresolvableCountry { row: usize, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

/// What happened during one normalization run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationSummary {
    pub row_count: usize,
    pub renamed: Vec<ColumnRename>,
    pub passthrough: Vec<String>,
    pub issues: Vec<DataIssue>,
}

impl NormalizationSummary {
    pub fn unparseable_count(&self, field: Field) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, DataIssue::UnparseableValue { field: f, .. } if *f == field))
            .count()
    }

    pub fn unresolved_country_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, DataIssue::UnresolvableCountry { .. }))
            .count()
    }

    /// Fields reported absent for the whole table, deduplicated
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self
            .issues
            .iter()
            .filter_map(|i| match i {
                DataIssue::MissingField { field, .. } => Some(*field),
                _ => None,
            })
            .collect();
        fields.sort();
        fields.dedup();
        fields
    }
}

/// Where each canonical field comes from in a raw table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapping {
    sources: BTreeMap<Field, Vec<String>>,
    passthrough: Vec<String>,
}

impl ColumnMapping {
    /// Map raw column labels to fields. Unrecognized labels pass through.
    pub fn resolve(columns: &[String]) -> Self {
        let mut mapping = ColumnMapping::default();
        for column in columns {
            match Field::for_label(column) {
                Some(field) => mapping.sources.entry(field).or_default().push(column.clone()),
                None => mapping.passthrough.push(column.clone()),
            }
        }
        mapping
    }

    pub fn has(&self, field: Field) -> bool {
        self.sources.contains_key(&field)
    }

    /// Raw columns feeding `field`, in table order
    pub fn sources(&self, field: Field) -> &[String] {
        self.sources.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn passthrough(&self) -> &[String] {
        &self.passthrough
    }

    /// Raw labels whose name changes under renaming. Columns of derived-only
    /// fields are recomputed, not renamed, and are left out.
    pub fn renames(&self) -> Vec<ColumnRename> {
        let mut renames: Vec<ColumnRename> = self
            .sources
            .iter()
            .filter(|(field, _)| field.spec().coercion.is_some())
            .flat_map(|(field, columns)| {
                columns
                    .iter()
                    .filter(|c| c.as_str() != field.name())
                    .map(|c| ColumnRename {
                        from: c.clone(),
                        to: field.name().to_string(),
                    })
            })
            .collect();
        renames.sort_by(|a, b| a.from.cmp(&b.from));
        renames
    }
}

/// Rename a list of column labels to canonical names. Synonyms of the same
/// field collapse into one column; unrecognized labels are kept as they are.
pub fn rename_columns(columns: &[String]) -> Vec<String> {
    let mut renamed: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        let name = Field::for_label(column)
            .map(|f| f.name().to_string())
            .unwrap_or_else(|| column.clone());
        if !renamed.contains(&name) {
            renamed.push(name);
        }
    }
    renamed
}

/// Read one field from a raw row: the first source column holding a usable
/// value wins. Unparseable cells are recorded and treated as missing.
fn read_field(
    row: &RawRecord,
    row_index: usize,
    field: Field,
    coercion: Coercion,
    mapping: &ColumnMapping,
    issues: &mut Vec<DataIssue>,
) -> Option<CellValue> {
    let mut bad_cell: Option<&Value> = None;
    for column in mapping.sources(field) {
        let Some(raw) = row.get(column) else {
            continue;
        };
        match coerce(coercion, raw) {
            Coerced::Value(value) => return Some(value),
            Coerced::Missing => {}
            Coerced::Unparseable => {
                bad_cell.get_or_insert(raw);
            }
        }
    }

    if let Some(raw) = bad_cell {
        debug!("Row {}: could not read {} from {}", row_index, field, raw);
        metrics::counter!("company_pipeline_unparseable_cells_total", "field" => field.name())
            .increment(1);
        issues.push(DataIssue::UnparseableValue {
            row: row_index,
            field,
            raw: raw.clone(),
        });
    }
    None
}

/// Rename and coerce one raw row. Derived fields are left for enrichment;
/// a directly supplied founding year is read here.
pub fn normalize_row(
    row: &RawRecord,
    row_index: usize,
    mapping: &ColumnMapping,
    issues: &mut Vec<DataIssue>,
) -> CompanyRecord {
    let mut record = CompanyRecord::default();

    for spec in FIELD_SPECS {
        let Some(coercion) = spec.coercion else {
            continue;
        };
        if !mapping.has(spec.field) {
            continue;
        }
        let value = read_field(row, row_index, spec.field, coercion, mapping, issues);
        match (spec.field, value) {
            (Field::Id, Some(CellValue::Text(v))) => record.id = Some(v),
            (Field::CompanyName, Some(CellValue::Text(v))) => record.company_name = Some(v),
            (Field::Sector, Some(CellValue::Text(v))) => record.sector = Some(v),
            (Field::Country, Some(CellValue::Text(v))) => record.country = Some(v),
            (Field::AnnualRevenue, Some(CellValue::Number(v))) => record.annual_revenue = Some(v),
            (Field::EmployeeCount, Some(CellValue::Count(v))) => record.employee_count = Some(v),
            (Field::FoundingDate, Some(CellValue::Date(v))) => record.founding_date = Some(v),
            (Field::FoundingYear, Some(CellValue::Year(v))) => record.founding_year = Some(v),
            _ => {}
        }
    }

    for column in mapping.passthrough() {
        if let Some(value) = row.get(column) {
            record.extra.insert(column.clone(), value.clone());
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn row(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_rename_keeps_unknown_columns() {
        let columns = labels(&["Company Name", "Number of Employees", "ceo", "Setor"]);
        assert_eq!(
            rename_columns(&columns),
            labels(&["company_name", "employee_count", "ceo", "sector"])
        );
    }

    #[test]
    fn test_rename_is_idempotent() {
        let columns = labels(&["Nome da Empresa", "Receita Anual", "Data de Fundação", "notes"]);
        let once = rename_columns(&columns);
        assert_eq!(rename_columns(&once), once);
    }

    #[test]
    fn test_rename_with_no_matches_is_a_no_op() {
        let columns = labels(&["alpha", "beta"]);
        assert_eq!(rename_columns(&columns), columns);
        assert!(ColumnMapping::resolve(&columns).renames().is_empty());
    }

    #[test]
    fn test_synonyms_collapse_and_coalesce_in_column_order() {
        let columns = labels(&["Employee Count", "Number of Employees"]);
        let mapping = ColumnMapping::resolve(&columns);
        assert_eq!(mapping.sources(Field::EmployeeCount).len(), 2);

        let mut issues = Vec::new();
        let first_blank = row(json!({"Employee Count": null, "Number of Employees": 40}));
        let record = normalize_row(&first_blank, 0, &mapping, &mut issues);
        assert_eq!(record.employee_count, Some(40));

        let both = row(json!({"Employee Count": 12, "Number of Employees": 40}));
        let record = normalize_row(&both, 1, &mapping, &mut issues);
        assert_eq!(record.employee_count, Some(12));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_unparseable_cell_is_recorded_not_fatal() {
        let columns = labels(&["Revenue", "Company"]);
        let mapping = ColumnMapping::resolve(&columns);
        let mut issues = Vec::new();
        let record = normalize_row(
            &row(json!({"Revenue": "about a million", "Company": "Acme"})),
            3,
            &mapping,
            &mut issues,
        );
        assert_eq!(record.annual_revenue, None);
        assert_eq!(record.company_name.as_deref(), Some("Acme"));
        assert_eq!(
            issues,
            vec![DataIssue::UnparseableValue {
                row: 3,
                field: Field::AnnualRevenue,
                raw: json!("about a million"),
            }]
        );
    }

    #[test]
    fn test_passthrough_columns_land_in_extra() {
        let columns = labels(&["Company", "ceo"]);
        let mapping = ColumnMapping::resolve(&columns);
        let mut issues = Vec::new();
        let record = normalize_row(&row(json!({"Company": "Acme", "ceo": "Ada"})), 0, &mapping, &mut issues);
        assert_eq!(record.extra.get("ceo"), Some(&json!("Ada")));
        assert_eq!(mapping.passthrough(), &["ceo".to_string()]);
    }

    #[test]
    fn test_renames_report_only_changed_labels() {
        let columns = labels(&["company_name", "Setor"]);
        let renames = ColumnMapping::resolve(&columns).renames();
        assert_eq!(
            renames,
            vec![ColumnRename {
                from: "Setor".into(),
                to: "sector".into()
            }]
        );
    }

    #[test]
    fn test_recomputed_columns_are_not_reported_as_renamed() {
        let columns = labels(&["Receita Anual", "Porte", "codigo_pais", "Ano de Fundação"]);
        let renamed: Vec<String> = ColumnMapping::resolve(&columns)
            .renames()
            .into_iter()
            .map(|r| r.from)
            .collect();
        assert_eq!(renamed, vec!["Ano de Fundação", "Receita Anual"]);
    }
}
