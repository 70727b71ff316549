use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::schema::Coercion;

/// A typed canonical cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Count(u64),
    Year(i32),
    Date(NaiveDate),
}

/// Result of coercing one raw cell. `Missing` is an empty cell;
/// `Unparseable` is a cell that had content the coercion could not read.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Value(CellValue),
    Missing,
    Unparseable,
}

impl Coerced {
    fn from_option<T>(value: Option<T>, wrap: fn(T) -> CellValue) -> Self {
        match value {
            Some(v) => Coerced::Value(wrap(v)),
            None => Coerced::Unparseable,
        }
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn coerce(coercion: Coercion, value: &Value) -> Coerced {
    if is_blank(value) {
        return Coerced::Missing;
    }
    match coercion {
        Coercion::Text => Coerced::from_option(coerce_text(value), CellValue::Text),
        Coercion::Currency => Coerced::from_option(coerce_currency(value), CellValue::Number),
        Coercion::Count => Coerced::from_option(coerce_count(value), CellValue::Count),
        Coercion::Year => Coerced::from_option(coerce_year(value), CellValue::Year),
        Coercion::Date => Coerced::from_option(coerce_date(value), CellValue::Date),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Revenue-style coercion: numbers pass through, strings are cleaned of
/// currency markers and separators. Anything else is `None`.
pub fn coerce_currency(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_localized_number(s),
        _ => None,
    }
}

/// Parse a human-formatted amount such as `R$ 1.234,56`, `$1,234.56`,
/// `1 234,5 €` or `(12,00)`.
pub fn parse_localized_number(raw: &str) -> Option<f64> {
    let mut body = String::with_capacity(raw.len());
    let mut negative = false;
    let mut seen_digit = false;
    let mut finished = false;

    for c in raw.chars() {
        match c {
            '0'..='9' => {
                if finished {
                    return None;
                }
                seen_digit = true;
                body.push(c);
            }
            '.' | ',' => {
                if finished {
                    return None;
                }
                body.push(c);
            }
            '-' | '\u{2212}' | '(' => {
                negative = true;
                if seen_digit {
                    finished = true;
                }
            }
            ')' | '+' => {
                if seen_digit {
                    finished = true;
                }
            }
            // Whitespace and apostrophes are digit grouping or padding
            c if c.is_whitespace() || c == '\'' || c == '\u{2019}' => {}
            c if c.is_alphabetic() || is_currency_symbol(c) => {
                if seen_digit {
                    finished = true;
                }
            }
            _ => return None,
        }
    }

    if !seen_digit {
        return None;
    }

    let normalized = resolve_separators(&body)?;
    let parsed: f64 = normalized.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    Some(if negative { -parsed } else { parsed })
}

/// Decide which of `,` and `.` is the decimal mark and return a string
/// `f64::from_str` understands.
fn resolve_separators(body: &str) -> Option<String> {
    let commas = body.matches(',').count();
    let dots = body.matches('.').count();

    let out = match (commas, dots) {
        (0, 0) => body.to_string(),
        (c, d) if c > 0 && d > 0 => {
            let last_comma = body.rfind(',')?;
            let last_dot = body.rfind('.')?;
            if last_comma > last_dot {
                if c > 1 {
                    return None;
                }
                body.replace('.', "").replace(',', ".")
            } else {
                if d > 1 {
                    return None;
                }
                body.replace(',', "")
            }
        }
        (1, 0) => body.replace(',', "."),
        (_, 0) => body.replace(',', ""),
        (0, 1) => {
            let (head, tail) = body.split_once('.')?;
            if tail.len() == 3 && (1..=3).contains(&head.len()) {
                format!("{head}{tail}")
            } else {
                body.to_string()
            }
        }
        (0, _) => body.replace('.', ""),
        _ => return None,
    };
    Some(out)
}

fn is_currency_symbol(c: char) -> bool {
    matches!(
        c,
        '$' | '€' | '£' | '¥' | '₹' | '₩' | '₽' | '¢' | '₺' | '₱' | '₪' | '₫' | '₦'
    )
}

pub fn coerce_count(value: &Value) -> Option<u64> {
    let number = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Some(u);
            }
            n.as_f64()?
        }
        Value::String(s) => parse_localized_number(s)?,
        _ => return None,
    };
    if number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= u64::MAX as f64 {
        Some(number as u64)
    } else {
        None
    }
}

pub fn coerce_year(value: &Value) -> Option<i32> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if number.fract() == 0.0 && (0.0..=9999.0).contains(&number) {
        Some(number as i32)
    } else {
        None
    }
}

pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date(s),
        // Extended JSON from document stores: {"$date": "..."}
        Value::Object(map) => map.get("$date").and_then(Value::as_str).and_then(parse_date),
        _ => None,
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // Extended JSON object ids: {"$oid": "..."}
        Value::Object(map) => map.get("$oid").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
