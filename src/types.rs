use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{InsightsError, Result};

/// One company row as it arrives from a source: attribute label to scalar
pub type RawRecord = Map<String, Value>;

/// A raw tabular dataset: rows of key/value pairs with no guaranteed schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Union of all row keys in first-seen order
    pub columns: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    pub fn from_records(rows: Vec<RawRecord>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    /// Build a table from a JSON array of objects.
    pub fn from_json(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            InsightsError::StructuralInput(format!(
                "expected a JSON array of records, found {}",
                json_kind(value)
            ))
        })?;

        let mut rows = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::Object(map) => rows.push(map.clone()),
                other => {
                    return Err(InsightsError::StructuralInput(format!(
                        "row {} is {}, expected an object",
                        i,
                        json_kind(other)
                    )))
                }
            }
        }
        Ok(Self::from_records(rows))
    }

    /// Build a table from delimited text with a header row. Empty cells
    /// become `null`.
    pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
                h.trim().to_string()
            })
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(InsightsError::StructuralInput(
                "delimited input has no header row".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let mut row = RawRecord::new();
            for (i, header) in headers.iter().enumerate() {
                if header.is_empty() || row.contains_key(header) {
                    continue;
                }
                let cell = record.get(i).map(str::trim).unwrap_or("");
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                row.insert(header.clone(), value);
            }
            rows.push(row);
        }

        let mut seen: Vec<&str> = Vec::new();
        for h in &headers {
            if seen.contains(&h.as_str()) {
                warn!("Duplicate column '{}' in delimited input; keeping the first", h);
            }
            seen.push(h);
        }

        debug!("Read {} delimited rows with {} columns", rows.len(), headers.len());
        Ok(Self::from_records(rows))
    }

    /// Load a table from a `.json` or delimited (`.csv`, `.txt`) file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        if ext == "json" {
            let content = fs::read_to_string(path)?;
            let value: Value = serde_json::from_str(&content)?;
            Self::from_json(&value)
        } else {
            let content = fs::read(path)?;
            let delimiter = detect_delimiter(&content);
            Self::from_csv_reader(content.as_slice(), delimiter)
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Pick `;` or `,` by counting occurrences on the header line.
pub fn detect_delimiter(content: &[u8]) -> u8 {
    let first_line = content.split(|b| *b == b'\n').next().unwrap_or(&[]);
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_columns_are_union_in_first_seen_order() {
        let table = RawTable::from_json(&json!([
            {"a": 1, "b": 2},
            {"c": 3, "a": 4}
        ]))
        .unwrap();
        assert_eq!(table.columns, vec!["a", "b", "c"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_non_array_is_structural_error() {
        let result = RawTable::from_json(&json!({"company_name": "Acme"}));
        assert!(matches!(result, Err(InsightsError::StructuralInput(_))));

        let result = RawTable::from_json(&json!([{"company_name": "Acme"}, 5]));
        assert!(matches!(result, Err(InsightsError::StructuralInput(_))));
    }

    #[test]
    fn test_csv_with_bom_and_empty_cells() {
        let data = "\u{feff}Nome da Empresa;Receita Anual;País\nAcme;R$ 1.234,56;\n";
        let table = RawTable::from_csv_reader(data.as_bytes(), b';').unwrap();

        assert_eq!(table.columns, vec!["Nome da Empresa", "Receita Anual", "País"]);
        let row = &table.rows[0];
        assert_eq!(row["Nome da Empresa"], json!("Acme"));
        assert_eq!(row["Receita Anual"], json!("R$ 1.234,56"));
        assert_eq!(row["País"], Value::Null);
    }

    #[test]
    fn test_empty_csv_is_structural_error() {
        let result = RawTable::from_csv_reader("".as_bytes(), b',');
        assert!(matches!(result, Err(InsightsError::StructuralInput(_))));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter(b"a;b;c\n1;2;3"), b';');
        assert_eq!(detect_delimiter(b"a,b,c\n1,2,3"), b',');
    }
}
