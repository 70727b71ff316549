use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;
use tracing::info;

use crate::pipeline::processing::country::COUNTRIES;
use crate::types::RawRecord;

pub const SECTORS: [&str; 5] = ["Technology", "Healthcare", "Finance", "Education", "Human Resources"];

const SURNAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts",
];

const SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Group", "PLC", "and Sons"];

const MIN_REVENUE: f64 = 1_000_000.0;
const MAX_REVENUE: f64 = 1_000_000_000.0;
const MIN_EMPLOYEES: u64 = 10;
const MAX_EMPLOYEES: u64 = 500;
const MAX_AGE_DAYS: i64 = 50 * 365;

/// Generate `count` synthetic company documents keyed the way the document
/// store keeps them. A seed makes the output reproducible for a given day.
pub fn generate_companies(count: usize, seed: Option<u64>) -> Vec<RawRecord> {
    generate_companies_until(count, seed, Utc::now().date_naive())
}

/// Like `generate_companies`, with founding dates drawn from the fifty years
/// before `today`.
pub fn generate_companies_until(count: usize, seed: Option<u64>, today: NaiveDate) -> Vec<RawRecord> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let companies: Vec<RawRecord> = (0..count)
        .map(|_| {
            let revenue = (rng.gen_range(MIN_REVENUE..=MAX_REVENUE) * 100.0).round() / 100.0;
            let founded = today - Duration::days(rng.gen_range(0..=MAX_AGE_DAYS));
            let country = COUNTRIES.choose(&mut rng).map(|c| c.name).unwrap_or("United States");

            let document = json!({
                "nome_empresa": random_company_name(&mut rng),
                "setor": SECTORS.choose(&mut rng).copied().unwrap_or(SECTORS[0]),
                "receita_anual": revenue,
                "numero_funcionarios": rng.gen_range(MIN_EMPLOYEES..=MAX_EMPLOYEES),
                "pais": country,
                "data_fundacao": founded.format("%Y-%m-%d").to_string(),
            });
            match document {
                serde_json::Value::Object(map) => map,
                _ => RawRecord::new(),
            }
        })
        .collect();

    info!("Generated {} synthetic companies", companies.len());
    companies
}

fn random_company_name(rng: &mut StdRng) -> String {
    let first = SURNAMES.choose(rng).copied().unwrap_or("Smith");
    let second = SURNAMES.choose(rng).copied().unwrap_or("Jones");
    let third = SURNAMES.choose(rng).copied().unwrap_or("Brown");
    match rng.gen_range(0..3) {
        0 => format!("{} {}", first, SUFFIXES.choose(rng).copied().unwrap_or("Inc")),
        1 => format!("{first}-{second}"),
        _ => format!("{first}, {second} and {third}"),
    }
}
