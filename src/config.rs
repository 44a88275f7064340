use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }

    /// Log format used when `LOG_FORMAT` is unset.
    #[must_use]
    pub fn default_log_format(&self) -> LogFormat {
        match self {
            Self::Stage | Self::Prod => LogFormat::Json,
            Self::Local | Self::Dev => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub db_max_connections: u32,

    // Seeded operator account
    pub default_admin_username: String,
    pub default_admin_password: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,
    pub max_body_bytes: usize,

    // Application metadata
    pub deployment: Deployment,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://database.db?mode=rwc".to_string(),
            db_max_connections: 5,
            default_admin_username: "admin".to_string(),
            default_admin_password: "admin1".to_string(),
            api_host: "0.0.0.0".to_string(),
            api_port: 5000,
            max_body_bytes: 1024 * 1024,
            deployment: Deployment::Local,
            log_format: LogFormat::Pretty,
        }
    }
}

impl LogFormat {
    /// `LOG_FORMAT` override; unknown values defer to the deployment default.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Unset variables fall back to [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let deployment =
            Deployment::from_str(&env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()));
        let log_format = env::var("LOG_FORMAT")
            .ok()
            .and_then(|raw| LogFormat::parse(&raw))
            .unwrap_or_else(|| deployment.default_log_format());

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            // Seeded operator account
            default_admin_username: env::var("DEFAULT_ADMIN_USERNAME")
                .unwrap_or(defaults.default_admin_username),
            default_admin_password: env::var("DEFAULT_ADMIN_PASSWORD")
                .unwrap_or(defaults.default_admin_password),

            // API settings
            api_host: env::var("API_HOST").unwrap_or(defaults.api_host),
            api_port: parse_var("API_PORT", defaults.api_port)?,
            max_body_bytes: parse_var("MAX_BODY_BYTES", defaults.max_body_bytes)?,

            // Application metadata
            deployment,
            log_format,
        })
    }

    /// Configuration for a throwaway in-memory database, used by tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_aliases() {
        assert_eq!(Deployment::from_str("Production"), Deployment::Prod);
        assert_eq!(Deployment::from_str("staging"), Deployment::Stage);
        assert_eq!(Deployment::from_str("dev"), Deployment::Dev);
        assert_eq!(Deployment::from_str("anything"), Deployment::Local);
    }

    #[test]
    fn shared_deployments_default_to_json_logs() {
        assert_eq!(Deployment::Prod.default_log_format(), LogFormat::Json);
        assert_eq!(Deployment::Stage.default_log_format(), LogFormat::Json);
        assert_eq!(Deployment::Dev.default_log_format(), LogFormat::Pretty);
        assert_eq!(Deployment::Local.default_log_format(), LogFormat::Pretty);
    }

    #[test]
    fn log_format_override() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" pretty "), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn parse_value_accepts_padded_numbers() {
        let port: u16 = parse_value("API_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn parse_value_rejects_garbage() {
        let err = parse_value::<u16>("API_PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }

    #[test]
    fn defaults_match_seeded_admin() {
        let config = Config::default();
        assert_eq!(config.default_admin_username, "admin");
        assert_eq!(config.default_admin_password, "admin1");
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }
}
