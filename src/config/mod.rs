use dashmap::DashMap;
use std::env;
use std::fmt;
use std::sync::Arc;
use strum_macros::EnumString;

/// Variable holding the deployment environment name
pub const ENVIRONMENT_KEY: &str = "APP_ENVIRONMENT";

/// Checked when [`ENVIRONMENT_KEY`] is not set
pub const FALLBACK_ENVIRONMENT_KEY: &str = "ENVIRONMENT";

/// Deployment environment the application runs in.
///
/// Names are matched case-insensitively by [`Environment::from_name`]; unknown
/// names are kept as [`Environment::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    Development,
    Staging,
    #[default]
    Production,
    #[strum(disabled)]
    Other(String),
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        name.parse()
            .unwrap_or_else(|_| Environment::Other(name.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            Environment::Development => "Development",
            Environment::Staging => "Staging",
            Environment::Production => "Production",
            Environment::Other(name) => name,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Snapshot the process environment variables
    pub fn new() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// The configured deployment environment.
    ///
    /// Defaults to [`Environment::Production`] when nothing is set, so
    /// diagnostics stay hidden unless asked for.
    pub fn environment(&self) -> Environment {
        self.get(ENVIRONMENT_KEY)
            .or_else(|| self.get(FALLBACK_ENVIRONMENT_KEY))
            .filter(|name| !name.trim().is_empty())
            .map(|name| Environment::from_name(&name))
            .unwrap_or_default()
    }
}
