//! Process configuration, read once from the environment at startup.

use invoicely_observability::LogFormat;

pub const ENV_SEED: &str = "INVOICELY_SEED";
pub const ENV_LOG_FORMAT: &str = "INVOICELY_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Load the fixed seed invoices into the store at startup.
    pub seed: bool,
    pub log_format: LogFormat,
    /// Problems found while reading the environment. Logging is not set up
    /// yet at that point, so the caller reports these after `init`.
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: true,
            log_format: LogFormat::default(),
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unknown values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SEED) {
            match parse_bool(&raw) {
                Some(seed) => config.seed = seed,
                None => config
                    .warnings
                    .push(format!("{ENV_SEED}={raw:?} is not a boolean; seeding enabled")),
            }
        }

        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            match LogFormat::parse(&raw) {
                Some(format) => config.log_format = format,
                None => config
                    .warnings
                    .push(format!("{ENV_LOG_FORMAT}={raw:?} is not json|pretty; using json")),
            }
        }

        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
