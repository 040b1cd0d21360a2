use std::fmt;

use anyhow::{Result, anyhow};

pub const PRODUCTION_BASE_URL: &str = "https://ichad043.pythonanywhere.com";

/// Host loopback as seen from an Android emulator, pointing at a local dev server.
pub const EMULATOR_BASE_URL: &str = "http://10.0.2.2:5000";

/// Build-time selection of the API origin.
const BUILD_TARGET: Option<&str> = option_env!("COUNTRYINFO_TARGET");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Production,
    Emulator,
}

impl Target {
    /// Target baked in at compile time. Unknown values fall back to production.
    pub fn selected() -> Self {
        Self::from_build_value(BUILD_TARGET).unwrap_or(Target::Production)
    }

    /// Raw value that did not name a target, if any.
    pub fn unrecognized_build_value() -> Option<&'static str> {
        BUILD_TARGET.filter(|raw| raw.parse::<Target>().is_err())
    }

    fn from_build_value(raw: Option<&str>) -> Option<Self> {
        match raw {
            None => Some(Target::Production),
            Some(raw) => raw.parse().ok(),
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Target::Production => PRODUCTION_BASE_URL,
            Target::Emulator => EMULATOR_BASE_URL,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Production => write!(f, "production"),
            Target::Emulator => write!(f, "emulator"),
        }
    }
}

impl std::str::FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Target::Production),
            "emulator" | "local" => Ok(Target::Emulator),
            _ => Err(anyhow!(
                "unknown target: {} (expected 'production' or 'emulator')",
                s
            )),
        }
    }
}
