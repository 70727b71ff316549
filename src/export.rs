use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::EXPORT_FILE_STEM;
use crate::domain::CompanyRecord;
use crate::error::Result;
use crate::pipeline::processing::normalize::Field;
use crate::pipeline::NormalizedTable;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Base export columns, in order. `Id` is written only when present.
const BASE_COLUMNS: [Field; 8] = [
    Field::Id,
    Field::CompanyName,
    Field::Sector,
    Field::AnnualRevenue,
    Field::EmployeeCount,
    Field::Country,
    Field::FoundingDate,
    Field::FoundingYear,
];

const DERIVED_COLUMNS: [Field; 4] = [
    Field::CountryIso3,
    Field::CompanyAgeYears,
    Field::RevenuePerEmployee,
    Field::SizeTier,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// snake_case canonical names
    Canonical,
    /// Portuguese display labels
    Localized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: u8,
    pub header_style: HeaderStyle,
    /// Render money as `R$ 1.234,56`
    pub format_currency: bool,
    /// Prefix the file with a UTF-8 byte order mark
    pub bom: bool,
    pub include_derived: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            header_style: HeaderStyle::Localized,
            format_currency: true,
            bom: true,
            include_derived: false,
        }
    }
}

pub fn localized_header(field: Field) -> &'static str {
    match field {
        Field::Id => "ID",
        Field::CompanyName => "Nome da Empresa",
        Field::Sector => "Setor",
        Field::AnnualRevenue => "Receita Anual",
        Field::EmployeeCount => "Nº de Funcionários",
        Field::Country => "País",
        Field::CountryIso3 => "Código do País",
        Field::FoundingDate => "Data de Fundação",
        Field::FoundingYear => "Ano de Fundação",
        Field::CompanyAgeYears => "Idade da Empresa",
        Field::RevenuePerEmployee => "Receita por Funcionário",
        Field::SizeTier => "Porte",
    }
}

/// Format an amount as `R$ 1.234,56`
pub fn format_brl(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// Columns a table exports with these options
pub fn export_fields(table: &NormalizedTable, options: &ExportOptions) -> Vec<Field> {
    let derived: &[Field] = if options.include_derived { &DERIVED_COLUMNS } else { &[] };
    BASE_COLUMNS
        .iter()
        .chain(derived)
        .copied()
        .filter(|f| table.has_field(*f))
        .collect()
}

fn cell(record: &CompanyRecord, field: Field, options: &ExportOptions) -> String {
    let money = |v: Option<f64>| match v {
        Some(v) if options.format_currency => format_brl(v),
        Some(v) => v.to_string(),
        None => String::new(),
    };
    match field {
        Field::AnnualRevenue => money(record.annual_revenue),
        Field::RevenuePerEmployee => money(record.revenue_per_employee),
        Field::FoundingDate => record
            .founding_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        other => match record.field_value(other) {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s,
            value => value.to_string(),
        },
    }
}

/// Write the table as delimited text. Returns the number of data rows.
pub fn write_csv<W: Write>(table: &NormalizedTable, mut writer: W, options: &ExportOptions) -> Result<usize> {
    if options.bom {
        writer.write_all(UTF8_BOM)?;
    }
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    let fields = export_fields(table, options);
    csv_writer.write_record(fields.iter().map(|f| match options.header_style {
        HeaderStyle::Canonical => f.name(),
        HeaderStyle::Localized => localized_header(*f),
    }))?;

    for record in &table.records {
        csv_writer.write_record(fields.iter().map(|f| cell(record, *f, options)))?;
    }
    csv_writer.flush()?;
    Ok(table.records.len())
}

/// Write `<output_dir>/companies.csv`
pub fn export_to_dir(table: &NormalizedTable, output_dir: &Path, options: &ExportOptions) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{EXPORT_FILE_STEM}.csv"));
    let file = BufWriter::new(File::create(&path)?);
    let rows = write_csv(table, file, options)?;
    info!("Exported {} companies to {}", rows, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{CompanyPipeline, PipelineOptions};
    use serde_json::json;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(523_456_789.12), "R$ 523.456.789,12");
        assert_eq!(format_brl(999.0), "R$ 999,00");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(-5.0), "-R$ 5,00");
    }

    #[test]
    fn test_canonical_export_layout() {
        let table = CompanyPipeline::new(PipelineOptions {
            reference_year: Some(2025),
        })
        .normalize_value(&json!([
            {"Company": "Acme", "Revenue": 1500.5, "ceo": "Ada"}
        ]))
        .unwrap();

        let options = ExportOptions {
            delimiter: b',',
            header_style: HeaderStyle::Canonical,
            format_currency: false,
            bom: false,
            include_derived: true,
        };
        let mut out = Vec::new();
        write_csv(&table, &mut out, &options).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "company_name,annual_revenue,size_tier\nAcme,1500.5,Micro\n");
    }

    #[test]
    fn test_localized_export_has_bom_and_labels() {
        let table = CompanyPipeline::default()
            .normalize_value(&json!([{"nome_empresa": "Silva", "receita_anual": 1234.56}]))
            .unwrap();
        let mut out = Vec::new();
        write_csv(&table, &mut out, &ExportOptions::default()).unwrap();
        assert!(out.starts_with(UTF8_BOM));
        let text = String::from_utf8(out[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "Nome da Empresa;Receita Anual\nSilva;R$ 1.234,56\n");
    }
}
