use dotenvy::dotenv;
use std::env;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// Deployment environment, derived from `NODE_ENV`. Anything other than
/// the literal "production" counts as development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_node_env(value: Option<&str>) -> Environment {
        match value {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Process configuration, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_url: String,
    pub port: u16,
    pub environment: Environment,
    pub openai_api_key: Option<String>,
}

impl Config {
    /// Build configuration from the process environment, loading a `.env`
    /// file first if one is present (its absence is not an error).
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary lookup function. This is what
    /// `from_env` delegates to; tests inject their own lookup so they never
    /// touch process-global state.
    pub fn from_lookup<F>(get: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An empty MONGODB_URL is as useless as a missing one.
        let mongodb_url = get("MONGODB_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar("MONGODB_URL"))?;

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidVar { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let environment = Environment::from_node_env(get("NODE_ENV").as_deref());

        let openai_api_key = get("OPENAI_API_KEY").filter(|v| !v.trim().is_empty());

        Ok(Config {
            mongodb_url,
            port,
            environment,
            openai_api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn missing_mongodb_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("MONGODB_URL")));
    }

    #[test]
    fn empty_mongodb_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[("MONGODB_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("MONGODB_URL")));
    }

    #[test]
    fn defaults_apply_when_only_mongodb_url_is_set() {
        let config =
            Config::from_lookup(lookup(&[("MONGODB_URL", "mongodb://localhost:27017")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn port_is_parsed_when_present() {
        let config = Config::from_lookup(lookup(&[
            ("MONGODB_URL", "mongodb://localhost:27017"),
            ("PORT", "3000"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn unparsable_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("MONGODB_URL", "mongodb://localhost:27017"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "PORT", .. }));
    }

    #[test]
    fn node_env_production_selects_production() {
        let config = Config::from_lookup(lookup(&[
            ("MONGODB_URL", "mongodb://localhost:27017"),
            ("NODE_ENV", "production"),
        ]))
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn any_other_node_env_selects_development() {
        for value in ["staging", "PRODUCTION", "dev", ""] {
            let config = Config::from_lookup(lookup(&[
                ("MONGODB_URL", "mongodb://localhost:27017"),
                ("NODE_ENV", value),
            ]))
            .unwrap();
            assert_eq!(
                config.environment,
                Environment::Development,
                "NODE_ENV={value:?}"
            );
        }
    }

    #[test]
    fn openai_api_key_is_picked_up() {
        let config = Config::from_lookup(lookup(&[
            ("MONGODB_URL", "mongodb://localhost:27017"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
    }
}
