use anyhow::Result;
use chrono::NaiveDate;
use company_insights::export::{export_to_dir, write_csv, ExportOptions, HeaderStyle};
use company_insights::generator::generate_companies_until;
use company_insights::pipeline::{CompanyPipeline, PipelineOptions};
use company_insights::types::{detect_delimiter, RawTable};
use tempfile::tempdir;

fn pipeline() -> CompanyPipeline {
    CompanyPipeline::new(PipelineOptions {
        reference_year: Some(2025),
    })
}

#[test]
fn test_localized_export_reads_back_to_same_values() -> Result<()> {
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let documents = generate_companies_until(40, Some(11), today);
    let original = pipeline().normalize(&RawTable::from_records(documents));

    let mut buffer = Vec::new();
    write_csv(&original, &mut buffer, &ExportOptions::default())?;

    let reread = pipeline().normalize(&RawTable::from_csv_reader(buffer.as_slice(), b';')?);

    assert_eq!(reread.len(), original.len());
    assert_eq!(reread.columns, original.columns);
    assert_eq!(reread.records, original.records);
    Ok(())
}

#[test]
fn test_canonical_export_with_derived_columns() -> Result<()> {
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let original = pipeline().normalize(&RawTable::from_records(generate_companies_until(
        10,
        Some(3),
        today,
    )));

    let options = ExportOptions {
        delimiter: b',',
        header_style: HeaderStyle::Canonical,
        format_currency: false,
        bom: false,
        include_derived: true,
    };
    let mut buffer = Vec::new();
    write_csv(&original, &mut buffer, &options)?;

    let text = String::from_utf8(buffer.clone())?;
    let header = text.lines().next().unwrap_or_default();
    assert!(header.starts_with("company_name,sector,annual_revenue,employee_count,country"));
    assert!(header.ends_with("company_age_years,revenue_per_employee,size_tier"));

    let reread = pipeline().normalize(&RawTable::from_csv_reader(buffer.as_slice(), b',')?);
    assert_eq!(reread.records, original.records);
    Ok(())
}

#[test]
fn test_export_to_dir_writes_companies_csv() -> Result<()> {
    let dir = tempdir()?;
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let table = pipeline().normalize(&RawTable::from_records(generate_companies_until(5, Some(1), today)));

    let path = export_to_dir(&table, dir.path(), &ExportOptions::default())?;
    assert_eq!(path, dir.path().join("companies.csv"));

    let content = std::fs::read(&path)?;
    assert_eq!(detect_delimiter(&content), b';');
    let reread = RawTable::from_path(&path)?;
    assert_eq!(reread.len(), 5);
    assert_eq!(reread.columns[0], "Nome da Empresa");
    Ok(())
}
