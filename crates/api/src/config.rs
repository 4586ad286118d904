use axum::http::HeaderValue;

/// Origin allowed by default when running in production.
pub const PRODUCTION_ORIGIN: &str = "https://estoes-challenge.up.railway.app";

/// Origin allowed by default everywhere else.
pub const DEVELOPMENT_ORIGIN: &str = "http://localhost:3000";

/// Deployment environment, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `"production"` (any case) selects production; anything else is development.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// CORS origin used when `CORS_ORIGINS` is not set.
    pub fn default_cors_origin(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_ORIGIN,
            Self::Development => DEVELOPMENT_ORIGIN,
        }
    }
}

/// Log output format, selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// `"json"` (any case) selects JSON; anything else is pretty.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration, built once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    pub environment: Environment,
    /// Allowed CORS origins.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database_url: String,
    /// Upper bound on pooled database connections (default: `10`).
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `APP_ENV`              | `development`                    |
    /// | `CORS_ORIGINS`         | depends on `APP_ENV`             |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `DATABASE_URL`         | required                         |
    /// | `DB_MAX_CONNECTIONS`   | `10`                             |
    /// | `LOG_FORMAT`           | `pretty` (`json` for JSON lines) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", lookup("PORT"), 3000)?;

        let environment = lookup("APP_ENV")
            .map(|raw| Environment::parse(&raw))
            .unwrap_or(Environment::Development);

        let cors_origins = match lookup("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                        name: "CORS_ORIGINS",
                        value: origin.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![HeaderValue::from_static(environment.default_cors_origin())],
        };

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", lookup("REQUEST_TIMEOUT_SECS"), 30)?;

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), 10)?;

        let log_format = lookup("LOG_FORMAT")
            .map(|raw| LogFormat::parse(&raw))
            .unwrap_or(LogFormat::Pretty);

        Ok(Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            database_url,
            db_max_connections,
            log_format,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { name, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/estoes")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.cors_origins, vec![DEVELOPMENT_ORIGIN]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn production_switches_default_origin() {
        let config = load(&[("DATABASE_URL", "postgres://x"), ("APP_ENV", "Production")]).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.cors_origins, vec![PRODUCTION_ORIGIN]);
    }

    #[test]
    fn explicit_origins_override_defaults() {
        let config = load(&[
            ("DATABASE_URL", "postgres://x"),
            ("APP_ENV", "production"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ])
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert_matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = load(&[("DATABASE_URL", "postgres://x"), ("PORT", "eighty")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { name: "PORT", .. });
    }

    #[test]
    fn origin_with_control_characters_is_rejected() {
        let err = load(&[("DATABASE_URL", "postgres://x"), ("CORS_ORIGINS", "http://a\u{7}")])
            .unwrap_err();
        assert_matches!(err, ConfigError::Invalid { name: "CORS_ORIGINS", .. });
    }

    #[test]
    fn log_format_json_is_case_insensitive() {
        let config = load(&[("DATABASE_URL", "postgres://x"), ("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);

        let config = load(&[("DATABASE_URL", "postgres://x"), ("LOG_FORMAT", "text")]).unwrap();
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
