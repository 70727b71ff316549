//! Best-effort country name to ISO 3166-1 alpha-3 resolution.
//!
//! Scoring: an exact hit on a code, name or alias is worth 50 points; the
//! query appearing inside a name is worth `max(5, 30 - 2 * position)`.
//! Highest score wins, ties go to the lowest alpha-2 code. When nothing
//! scores, names within a normalized Levenshtein similarity of 0.85 are
//! accepted as typos. Ambiguous short names can resolve to the wrong
//! country; results are advisory.

pub mod iso3166;

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

pub use iso3166::{CountryEntry, ALIASES, COUNTRIES};

const EXACT_POINTS: usize = 50;
const SUBSTRING_BASE_POINTS: usize = 30;
const SUBSTRING_MIN_POINTS: usize = 5;
const MIN_SUBSTRING_QUERY: usize = 3;
const TYPO_SIMILARITY: f64 = 0.85;

struct IndexedCountry {
    entry: &'static CountryEntry,
    codes: [String; 2],
    names: Vec<String>,
}

static INDEX: Lazy<Vec<IndexedCountry>> = Lazy::new(|| {
    COUNTRIES
        .iter()
        .map(|entry| IndexedCountry {
            entry,
            codes: [entry.alpha2.to_ascii_lowercase(), entry.alpha3.to_ascii_lowercase()],
            names: entry.names().map(fold_name).collect(),
        })
        .collect()
});

/// Lowercase, strip accents, drop periods, turn other punctuation into
/// spaces and collapse whitespace.
pub fn fold_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '.' => {}
            c if c.is_alphanumeric() => {
                for lower in c.to_lowercase() {
                    out.push(fold_accent(lower));
                }
            }
            _ => out.push(' '),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

fn alpha3_entry(code: &str) -> Option<&'static CountryEntry> {
    COUNTRIES.iter().find(|c| c.alpha3 == code)
}

/// Look up a table entry by alpha-3 code
pub fn country_by_iso3(code: &str) -> Option<&'static CountryEntry> {
    let upper = code.trim().to_ascii_uppercase();
    alpha3_entry(&upper)
}

/// Resolve a free-text country name to its alpha-3 code without caching.
pub fn resolve_iso3(name: &str) -> Option<&'static str> {
    let query = fold_name(name);
    if query.is_empty() {
        return None;
    }

    let mut scores: HashMap<&'static str, (usize, &'static CountryEntry)> = HashMap::new();
    let mut award = |entry: &'static CountryEntry, points: usize| {
        let slot = scores.entry(entry.alpha2).or_insert((0, entry));
        slot.0 += points;
    };

    for (alias, code) in ALIASES {
        if *alias == query {
            if let Some(entry) = alpha3_entry(code) {
                award(entry, EXACT_POINTS);
            }
        }
    }

    for country in INDEX.iter() {
        if country.codes.iter().any(|c| *c == query) || country.names.iter().any(|n| *n == query) {
            award(country.entry, EXACT_POINTS);
            continue;
        }
        if query.len() < MIN_SUBSTRING_QUERY {
            continue;
        }
        let best = country
            .names
            .iter()
            .filter_map(|n| n.find(&query))
            .map(|pos| SUBSTRING_BASE_POINTS.saturating_sub(2 * pos).max(SUBSTRING_MIN_POINTS))
            .max();
        if let Some(points) = best {
            award(country.entry, points);
        }
    }

    let best = scores
        .into_values()
        .max_by(|(pa, a), (pb, b)| pa.cmp(pb).then_with(|| b.alpha2.cmp(a.alpha2)))
        .map(|(_, entry)| entry);

    if let Some(entry) = best {
        return Some(entry.alpha3);
    }

    closest_by_spelling(&query)
}

fn closest_by_spelling(query: &str) -> Option<&'static str> {
    let mut best: Option<(f64, &'static CountryEntry)> = None;
    for country in INDEX.iter() {
        for name in &country.names {
            let similarity = strsim::normalized_levenshtein(query, name);
            if similarity < TYPO_SIMILARITY {
                continue;
            }
            let better = match best {
                None => true,
                Some((s, e)) => similarity > s || (similarity == s && country.entry.alpha2 < e.alpha2),
            };
            if better {
                best = Some((similarity, country.entry));
            }
        }
    }
    best.map(|(similarity, entry)| {
        debug!("Country '{}' matched '{}' by spelling ({:.2})", query, entry.name, similarity);
        entry.alpha3
    })
}

/// Country resolver with a per-instance cache of distinct names.
/// One resolver is meant to live for one pipeline run.
#[derive(Debug, Default)]
pub struct CountryResolver {
    cache: HashMap<String, Option<&'static str>>,
}

impl CountryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, name: &str) -> Option<&'static str> {
        if let Some(hit) = self.cache.get(name) {
            return *hit;
        }
        let resolved = resolve_iso3(name);
        self.cache.insert(name.to_string(), resolved);
        resolved
    }

    pub fn cached_names(&self) -> usize {
        self.cache.len()
    }
}
