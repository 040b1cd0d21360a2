use chrono::{DateTime, FixedOffset, Utc};
use console::style;

use crate::country::model::{CountryInfo, Currency};

const LABEL_WIDTH: usize = 11;

pub fn render_card(info: &CountryInfo, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} ({})",
            style(&info.country).bold(),
            style(&info.country_code).dim()
        ),
        row("Continent", &info.continent),
        row("Capital", &info.capital),
        row("Population", &info.population.to_string()),
        row("Currency", &format_currency(&info.currency)),
    ];

    match info.timezones.split_first() {
        None => lines.push(row("Timezones", "N/A")),
        Some((first, rest)) => {
            lines.push(row("Timezones", &format_timezone(first, now)));
            for tz in rest {
                lines.push(row("", &format_timezone(tz, now)));
            }
        }
    }

    lines.push(row("Flag", &info.flag_url));
    lines
}

fn row(label: &str, value: &str) -> String {
    format!("  {:<width$} {}", label, value, width = LABEL_WIDTH)
}

pub fn format_currency(currency: &Currency) -> String {
    if currency.code == "N/A" {
        return "N/A".to_string();
    }
    let mut out = format!("{}  {}", currency.code, currency.name);
    if !currency.symbol.is_empty() {
        out.push_str(&format!(" ({})", currency.symbol));
    }
    out
}

/// Labels such as `UTC`, `UTC+09` or `UTC-03:30` gain the current local time.
pub fn format_timezone(label: &str, now: DateTime<Utc>) -> String {
    match parse_utc_offset(label) {
        Some(offset) => format!(
            "{}  {}",
            label,
            style(now.with_timezone(&offset).format("%H:%M")).dim()
        ),
        None => label.to_string(),
    }
}

pub fn parse_utc_offset(label: &str) -> Option<FixedOffset> {
    let rest = label.trim().strip_prefix("UTC")?;
    if rest.is_empty() {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = if let Some(r) = rest.strip_prefix('+') {
        (1, r)
    } else if let Some(r) = rest.strip_prefix('-') {
        (-1, r)
    } else {
        return None;
    };

    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "00"));
    let hours = parse_digits(hours)?;
    let minutes = parse_digits(minutes)?;
    if hours > 14 || minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_digits(s: &str) -> Option<i32> {
    if s.is_empty() || s.len() > 2 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
