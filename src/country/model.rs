use std::fmt;

use serde::{Deserialize, Serialize};

/// Country record as served by `/search` and `/random`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub country: String,
    pub country_code: String,
    pub continent: String,
    pub capital: String,
    pub population: Population,
    #[serde(default)]
    pub timezones: Vec<String>,
    pub currency: Currency,
    pub flag_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

/// The server sends a head count, or `"N/A"` when the source data has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Population {
    Count(u64),
    Unknown(String),
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Population::Count(n) => write!(f, "{}", group_thousands(*n)),
            Population::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
