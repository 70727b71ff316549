use anyhow::Result;
use company_insights::domain::SizeTier;
use company_insights::pipeline::processing::normalize::{DataIssue, Field};
use company_insights::pipeline::{CompanyPipeline, PipelineOptions};
use company_insights::types::RawTable;
use serde_json::{json, Value};

fn pipeline() -> CompanyPipeline {
    CompanyPipeline::new(PipelineOptions {
        reference_year: Some(2025),
    })
}

#[test]
fn test_mixed_labels_end_to_end() -> Result<()> {
    let raw = json!([
        {
            "Company": "Alpha Corp",
            "Sector": "Technology",
            "Revenue": 1_000_000.0,
            "Employees": 10,
            "Country": "United States",
            "Founding Year": 2000
        },
        {
            "nome_empresa": "Beta Ltda",
            "setor": "Finance",
            "receita_anual": "R$ 1.234,56",
            "numero_funcionarios": 4,
            "pais": "Brasil",
            "ano_fundacao": 2010
        },
        {
            "company_name": "Gamma Group",
            "sector": "Healthcare",
            "annual_revenue": 1_000_000_000.0,
            "country": "U.S.A.",
            "founding_year": 1990
        }
    ]);

    let table = pipeline().normalize_value(&raw)?;
    assert_eq!(table.len(), 3);

    let alpha = &table.records[0];
    assert_eq!(alpha.company_name.as_deref(), Some("Alpha Corp"));
    assert_eq!(alpha.revenue_per_employee, Some(100_000.0));
    assert_eq!(alpha.company_age_years, Some(25));
    assert_eq!(alpha.size_tier, Some(SizeTier::Micro));
    assert_eq!(alpha.country_iso3.as_deref(), Some("USA"));

    let beta = &table.records[1];
    assert_eq!(beta.annual_revenue, Some(1234.56));
    assert_eq!(beta.country_iso3.as_deref(), Some("BRA"));

    let gamma = &table.records[2];
    assert_eq!(gamma.employee_count, None);
    assert_eq!(gamma.revenue_per_employee, None);
    assert_eq!(gamma.size_tier, Some(SizeTier::Corporation));
    assert_eq!(gamma.country_iso3.as_deref(), Some("USA"));

    let rows = table.to_rows();
    assert_eq!(rows[2]["revenue_per_employee"], Value::Null);
    assert_eq!(rows[1]["company_name"], json!("Beta Ltda"));
    assert!(table.summary.issues.is_empty());
    Ok(())
}

#[test]
fn test_degraded_columns_and_cells() -> Result<()> {
    let raw = json!([
        {"Company": "Solo", "Revenue": "not a number", "Country": "Atlantis", "ceo": "Ada"},
        {"Company": "Duo", "Revenue": 20_000_000.0, "Country": "Chile", "ceo": "Bob"}
    ]);

    let table = pipeline().normalize_value(&raw)?;

    // No employee column: revenue per employee cannot exist for the table
    assert!(!table.has_field(Field::RevenuePerEmployee));
    assert!(table.has_field(Field::SizeTier));
    assert!(table.summary.missing_fields().contains(&Field::EmployeeCount));

    assert_eq!(table.records[0].annual_revenue, None);
    assert_eq!(table.records[0].size_tier, None);
    assert_eq!(table.records[1].size_tier, Some(SizeTier::Small));
    assert_eq!(table.summary.unparseable_count(Field::AnnualRevenue), 1);

    assert_eq!(table.records[0].country_iso3, None);
    assert_eq!(table.records[1].country_iso3.as_deref(), Some("CHL"));
    assert_eq!(table.summary.unresolved_country_count(), 1);
    assert!(table.summary.issues.iter().any(|issue| matches!(
        issue,
        DataIssue::UnresolvableCountry { row: 0, name } if name == "Atlantis"
    )));

    assert_eq!(table.columns.last().map(String::as_str), Some("ceo"));
    assert_eq!(table.records[1].extra["ceo"], json!("Bob"));
    Ok(())
}

#[test]
fn test_normalizing_canonical_output_is_stable() -> Result<()> {
    let raw = json!([
        {"Nome da Empresa": "Silva", "Setor": "Education", "Receita Anual": 5_000_000.0,
         "Nº de Funcionários": 50, "País": "Portugal", "Data de Fundação": "2001-06-30"}
    ]);
    let first = pipeline().normalize_value(&raw)?;
    let rows: Vec<Value> = first.to_rows().into_iter().map(Value::Object).collect();
    let second = pipeline().normalize_value(&Value::Array(rows))?;

    assert_eq!(first.columns, second.columns);
    assert_eq!(first.records, second.records);
    assert!(second.summary.renamed.is_empty());
    Ok(())
}

#[test]
fn test_structural_errors() {
    assert!(pipeline().normalize_value(&json!({"Company": "x"})).is_err());
    assert!(pipeline().normalize_value(&json!([1, 2])).is_err());
    assert!(RawTable::from_csv_reader("".as_bytes(), b',').is_err());
}

#[test]
fn test_delimited_input() -> Result<()> {
    let csv = "Company;Revenue;Employees\nAcme;R$ 2.000.000,00;20\nBeta;;\n";
    let raw = RawTable::from_csv_reader(csv.as_bytes(), b';')?;
    let table = pipeline().normalize(&raw);

    assert_eq!(table.records[0].annual_revenue, Some(2_000_000.0));
    assert_eq!(table.records[0].revenue_per_employee, Some(100_000.0));
    assert_eq!(table.records[1].annual_revenue, None);
    assert_eq!(table.summary.unparseable_count(Field::AnnualRevenue), 0);
    assert_eq!(table.summary.unparseable_count(Field::EmployeeCount), 0);
    Ok(())
}
