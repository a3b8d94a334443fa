use std::str::FromStr;
use tracing::warn;

/// Endpoint used when none is configured. Requests to it fail, which the
/// synchronizer absorbs like any other outage.
pub const PLACEHOLDER_URL: &str = "https://placeholder.supabase.co";

/// Key used when none is configured.
pub const PLACEHOLDER_KEY: &str = "placeholder-key";

const URL_VARS: [&str; 3] = [
    "SUPABASE_URL",
    "REACT_APP_SUPABASE_URL",
    "NEXT_PUBLIC_SUPABASE_URL",
];
const KEY_VARS: [&str; 3] = [
    "SUPABASE_ANON_KEY",
    "REACT_APP_SUPABASE_ANON_KEY",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
];

/// Where the inventory table lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Hosted table over HTTP.
    #[default]
    Remote,
    /// In-process table; nothing survives the process.
    Local,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(StoreBackend::Remote),
            "local" => Ok(StoreBackend::Local),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

/// Store configuration loaded from environment variables.
///
/// Loading never fails: missing or malformed values fall back to defaults so
/// the application always starts.
///
/// | Env Var | Default |
/// |---------|---------|
/// | `SUPABASE_URL` (or `REACT_APP_`/`NEXT_PUBLIC_` prefixed) | `https://placeholder.supabase.co` |
/// | `SUPABASE_ANON_KEY` (or `REACT_APP_`/`NEXT_PUBLIC_` prefixed) | `placeholder-key` |
/// | `INVENTORY_ROW_LIMIT` | none (fetch every row) |
/// | `INVENTORY_BACKEND` | `remote` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
    pub row_limit: Option<usize>,
    pub backend: StoreBackend,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: PLACEHOLDER_URL.to_string(),
            api_key: PLACEHOLDER_KEY.to_string(),
            row_limit: None,
            backend: StoreBackend::Remote,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        let url = first(&URL_VARS).unwrap_or_else(|| {
            warn!("No table URL configured, using placeholder");
            PLACEHOLDER_URL.to_string()
        });
        let api_key = first(&KEY_VARS).unwrap_or_else(|| PLACEHOLDER_KEY.to_string());

        let row_limit = lookup("INVENTORY_ROW_LIMIT").and_then(|raw| {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => Some(limit),
                _ => {
                    warn!(value = %raw, "Ignoring invalid INVENTORY_ROW_LIMIT");
                    None
                }
            }
        });

        let backend = lookup("INVENTORY_BACKEND")
            .and_then(|raw| match raw.parse::<StoreBackend>() {
                Ok(backend) => Some(backend),
                Err(e) => {
                    warn!(error = %e, "Ignoring INVENTORY_BACKEND");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            url,
            api_key,
            row_limit,
            backend,
        }
    }

    /// True when no real endpoint was configured.
    pub fn is_placeholder(&self) -> bool {
        self.url == PLACEHOLDER_URL
    }
}
