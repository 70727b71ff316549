use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The fixed vocabulary of the canonical company table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    CompanyName,
    Sector,
    AnnualRevenue,
    EmployeeCount,
    Country,
    CountryIso3,
    FoundingDate,
    FoundingYear,
    CompanyAgeYears,
    RevenuePerEmployee,
    SizeTier,
}

/// How a raw cell is turned into a typed canonical value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Text,
    Currency,
    Count,
    Year,
    Date,
}

/// One row of the field specification table.
///
/// A field with a `coercion` can be read directly from any of its synonym
/// columns. A field with `requires` can be derived once those fields are
/// canonical; for fields that have both, derivation is the fallback used
/// when no source column exists.
#[derive(Debug)]
pub struct FieldSpec {
    pub field: Field,
    pub synonyms: &'static [&'static str],
    pub coercion: Option<Coercion>,
    pub requires: &'static [Field],
}

impl FieldSpec {
    pub fn is_derived(&self) -> bool {
        !self.requires.is_empty()
    }
}

/// Canonical column order. Every `Field` appears exactly once.
pub static FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec {
        field: Field::Id,
        synonyms: &["_id", "ID"],
        coercion: Some(Coercion::Text),
        requires: &[],
    },
    FieldSpec {
        field: Field::CompanyName,
        synonyms: &["Company Name", "Company", "Nome da Empresa", "nome_empresa", "Empresa"],
        coercion: Some(Coercion::Text),
        requires: &[],
    },
    FieldSpec {
        field: Field::Sector,
        synonyms: &["Sector", "Industry", "Setor", "setor"],
        coercion: Some(Coercion::Text),
        requires: &[],
    },
    FieldSpec {
        field: Field::AnnualRevenue,
        synonyms: &[
            "Annual Revenue",
            "Revenue",
            "Receita Anual",
            "receita_anual",
            "receita_anual_formatada",
        ],
        coercion: Some(Coercion::Currency),
        requires: &[],
    },
    FieldSpec {
        field: Field::EmployeeCount,
        synonyms: &[
            "Employee Count",
            "Number of Employees",
            "Employees",
            "Nº de Funcionários",
            "Nº Funcionários",
            "numero_funcionarios",
        ],
        coercion: Some(Coercion::Count),
        requires: &[],
    },
    FieldSpec {
        field: Field::Country,
        synonyms: &["Country", "País", "pais"],
        coercion: Some(Coercion::Text),
        requires: &[],
    },
    FieldSpec {
        field: Field::CountryIso3,
        synonyms: &["Country Code", "Código do País", "codigo_pais"],
        coercion: None,
        requires: &[Field::Country],
    },
    FieldSpec {
        field: Field::FoundingDate,
        synonyms: &["Founding Date", "Founded On", "Data de Fundação", "data_fundacao"],
        coercion: Some(Coercion::Date),
        requires: &[],
    },
    FieldSpec {
        field: Field::FoundingYear,
        synonyms: &[
            "Founding Year",
            "Year Founded",
            "Ano de Fundação",
            "Ano Fundação",
            "ano_fundacao",
        ],
        coercion: Some(Coercion::Year),
        requires: &[Field::FoundingDate],
    },
    FieldSpec {
        field: Field::CompanyAgeYears,
        synonyms: &["Company Age", "Idade da Empresa", "idade_empresa"],
        coercion: None,
        requires: &[Field::FoundingYear],
    },
    FieldSpec {
        field: Field::RevenuePerEmployee,
        synonyms: &["Revenue per Employee", "Receita por Funcionário", "receita_por_funcionario"],
        coercion: None,
        requires: &[Field::AnnualRevenue, Field::EmployeeCount],
    },
    FieldSpec {
        field: Field::SizeTier,
        synonyms: &["Size Tier", "Porte", "porte"],
        coercion: None,
        requires: &[Field::AnnualRevenue],
    },
];

/// Normalized label -> field, built once from `FIELD_SPECS`
static LABEL_INDEX: Lazy<HashMap<String, Field>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for spec in FIELD_SPECS {
        index.insert(fold_label(spec.field.name()), spec.field);
        for synonym in spec.synonyms {
            index.insert(fold_label(synonym), spec.field);
        }
    }
    index
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

fn fold_label(label: &str) -> String {
    WHITESPACE.replace_all(label.trim(), " ").to_lowercase()
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Id,
        Field::CompanyName,
        Field::Sector,
        Field::AnnualRevenue,
        Field::EmployeeCount,
        Field::Country,
        Field::CountryIso3,
        Field::FoundingDate,
        Field::FoundingYear,
        Field::CompanyAgeYears,
        Field::RevenuePerEmployee,
        Field::SizeTier,
    ];

    /// Canonical column name
    pub const fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::CompanyName => "company_name",
            Field::Sector => "sector",
            Field::AnnualRevenue => "annual_revenue",
            Field::EmployeeCount => "employee_count",
            Field::Country => "country",
            Field::CountryIso3 => "country_iso3",
            Field::FoundingDate => "founding_date",
            Field::FoundingYear => "founding_year",
            Field::CompanyAgeYears => "company_age_years",
            Field::RevenuePerEmployee => "revenue_per_employee",
            Field::SizeTier => "size_tier",
        }
    }

    pub fn spec(self) -> &'static FieldSpec {
        FIELD_SPECS
            .iter()
            .find(|s| s.field == self)
            .unwrap_or_else(|| unreachable!("every field has a spec entry"))
    }

    /// Resolve a raw column label: exact synonym or canonical name first,
    /// then a trimmed, case-insensitive comparison.
    pub fn for_label(label: &str) -> Option<Field> {
        for spec in FIELD_SPECS {
            if spec.field.name() == label || spec.synonyms.contains(&label) {
                return Some(spec.field);
            }
        }
        LABEL_INDEX.get(&fold_label(label)).copied()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
