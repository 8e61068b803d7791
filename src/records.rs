use csv::StringRecord;
use serde::Deserialize;
use std::{fs::File, path::Path};

use crate::error::ImportError;

const CURRENCY_SYMBOL: char = '€';

// Older exports put a space before the size suffix.
const LEGACY_HEADERS: [(&str, &str); 2] =
    [("STOCK _15ML", "STOCK_15ML"), ("STOCK _30ML", "STOCK_30ML")];

/// One line of the stock export, with text fields trimmed and numeric fields
/// already coerced. Decoding a row never fails on field content.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct ProductRow {
    #[serde(rename = "NOM", default, deserialize_with = "trim_string")]
    pub name: String,
    #[serde(rename = "CATEGORIE", default, deserialize_with = "trim_to_option")]
    pub category: Option<String>,
    #[serde(rename = "CAT_15ML", default, deserialize_with = "trim_to_option")]
    pub cat_15ml: Option<String>,
    #[serde(rename = "CAT_30ML", default, deserialize_with = "trim_to_option")]
    pub cat_30ml: Option<String>,
    #[serde(rename = "CAT_70ML", default, deserialize_with = "trim_to_option")]
    pub cat_70ml: Option<String>,
    #[serde(rename = "MARQUE", default, deserialize_with = "trim_to_option")]
    pub brand: Option<String>,
    #[serde(rename = "PX_15ML", default, deserialize_with = "lenient_price")]
    pub price_15ml: f64,
    #[serde(rename = "PX_30ML", default, deserialize_with = "lenient_price")]
    pub price_30ml: f64,
    #[serde(rename = "PX_70ML", default, deserialize_with = "lenient_price")]
    pub price_70ml: f64,
    #[serde(rename = "STOCK TOTAL", default, deserialize_with = "lenient_int")]
    pub stock_total: i64,
    #[serde(rename = "STOCK_15ML", default, deserialize_with = "lenient_int")]
    pub stock_15ml: i64,
    #[serde(rename = "STOCK_30ML", default, deserialize_with = "lenient_int")]
    pub stock_30ml: i64,
    #[serde(rename = "STOCK_70ML", default, deserialize_with = "lenient_int")]
    pub stock_70ml: i64,
}

/// Reads every row of a delimited export whose first line names the columns.
///
/// Rows shorter than the header are padded with empty fields, so a missing
/// trailing value reads the same as a blank one. Fields past the end of the
/// header are ignored.
pub fn read_csv<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Vec<ProductRow>, ImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;

    // The CSV reader is buffered automatically, no need for io::BufReader
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = canonical_headers(rdr.headers()?);
    let mut rows = Vec::new();

    for result in rdr.records() {
        let mut record = result?;
        while record.len() < headers.len() {
            record.push_field("");
        }
        rows.push(record.deserialize::<ProductRow>(Some(&headers))?);
    }

    Ok(rows)
}

/// Maps legacy spellings to the current column names and blanks out every
/// repeated name but the last, so the rightmost column wins.
fn canonical_headers(headers: &StringRecord) -> StringRecord {
    let names: Vec<&str> = headers
        .iter()
        .map(|name| {
            LEGACY_HEADERS
                .iter()
                .find(|(legacy, _)| *legacy == name)
                .map_or(name, |(_, current)| *current)
        })
        .collect();

    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if names[i + 1..].contains(name) {
                ""
            } else {
                *name
            }
        })
        .collect()
}

/// Parses a price written with a decimal comma and an optional euro sign,
/// e.g. `"1 234,50 €"`. Anything that does not parse to a finite number is
/// worth `0.0`.
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != CURRENCY_SYMBOL && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parses a whole count, `0` when blank or not a base-10 integer.
pub fn parse_int(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    Ok(s.trim().to_owned())
}

fn trim_to_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_owned()))
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    Ok(parse_price(&s))
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    Ok(parse_int(&s))
}
