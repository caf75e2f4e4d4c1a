use argon2::Params;
use chrono::TimeDelta;
use std::env;
use std::time::Duration;

/// Ten years; longer token lifetimes are rejected at startup
pub const MAX_ACCESS_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub test_before_acquire: bool,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of an issued access token
    pub access_token_ttl_secs: u64,
    /// Argon2id memory cost in KiB for new password hashes
    pub password_memory_kib: u32,
    /// Argon2id passes over memory for new password hashes
    pub password_time_cost: u32,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub log_level: String,
    pub log_format: String,
    pub http_host: String,
    pub http_port: u16,
    pub environment: String,
}

/// Parse an optional variable, falling back to `default` when unset.
/// A value that is set but unparsable is an error rather than silently ignored.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("Invalid {}: {}", key, raw)),
        None => Ok(default),
    }
}

impl DatabaseConfig {
    /// Create database config from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create database config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .ok_or_else(|| "DATABASE_URL environment variable is required".to_string())?;

        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;
        let acquire_timeout_secs = parse_or(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 30u64)?;
        let idle_timeout_secs = parse_or(&lookup, "DATABASE_IDLE_TIMEOUT_SECS", 600u64)?; // 10 minutes
        let max_lifetime_secs = parse_or(&lookup, "DATABASE_MAX_LIFETIME_SECS", 1800u64)?; // 30 minutes
        let test_before_acquire = parse_or(&lookup, "DATABASE_TEST_BEFORE_ACQUIRE", true)?;

        // Validate configuration
        if max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        if acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            url,
            max_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
            test_before_acquire,
        })
    }

    /// In-memory SQLite databases only live as long as their connection
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Get max lifetime as Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://eventhigh.db".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            test_before_acquire: true,
        }
    }
}

impl AuthConfig {
    /// Create auth config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token_ttl_secs = parse_or(&lookup, "ACCESS_TOKEN_TTL_SECS", 86_400u64)?;
        let password_memory_kib =
            parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", Params::DEFAULT_M_COST)?;
        let password_time_cost =
            parse_or(&lookup, "PASSWORD_HASH_TIME_COST", Params::DEFAULT_T_COST)?;

        if access_token_ttl_secs == 0 {
            return Err("ACCESS_TOKEN_TTL_SECS must be greater than 0".to_string());
        }

        if access_token_ttl_secs > MAX_ACCESS_TOKEN_TTL_SECS {
            return Err(format!(
                "ACCESS_TOKEN_TTL_SECS must be at most {}",
                MAX_ACCESS_TOKEN_TTL_SECS
            ));
        }

        if password_memory_kib < Params::MIN_M_COST {
            return Err(format!(
                "PASSWORD_HASH_MEMORY_KIB must be at least {}",
                Params::MIN_M_COST
            ));
        }

        if password_time_cost < Params::MIN_T_COST {
            return Err(format!(
                "PASSWORD_HASH_TIME_COST must be at least {}",
                Params::MIN_T_COST
            ));
        }

        let config = Self {
            access_token_ttl_secs,
            password_memory_kib,
            password_time_cost,
        };
        config.password_params()?;
        Ok(config)
    }

    /// Argon2 parameters for hashing new passwords
    pub fn password_params(&self) -> Result<Params, String> {
        Params::new(self.password_memory_kib, self.password_time_cost, 1, None)
            .map_err(|e| format!("Invalid password hashing parameters: {}", e))
    }

    /// Token lifetime, or `None` when it does not fit a `TimeDelta`
    pub fn access_token_ttl(&self) -> Option<TimeDelta> {
        i64::try_from(self.access_token_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_secs: 86_400,
            password_memory_kib: Params::DEFAULT_M_COST,
            password_time_cost: Params::DEFAULT_T_COST,
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create application config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig::from_lookup(&lookup)?;
        let auth = AuthConfig::from_lookup(&lookup)?;

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_format = lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string());
        let http_host = lookup("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let http_port = parse_or(&lookup, "HTTP_PORT", 8000u16)?;
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&log_format.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_FORMAT: {}. Must be one of: {:?}",
                log_format, valid_log_formats
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }

        Ok(Self {
            database,
            auth,
            log_level: log_level.to_lowercase(),
            log_format: log_format.to_lowercase(),
            http_host,
            http_port,
            environment: environment.to_lowercase(),
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }

    /// Socket address string the HTTP server binds to
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 8000,
            environment: "development".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout_secs, 30);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.http_port, 8000);
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.auth.access_token_ttl_secs, 86_400);
        assert!(config.auth.password_params().is_ok());
    }

    #[test]
    fn test_access_token_ttl_bounds() {
        let longest = AuthConfig::from_lookup(lookup_from(&[(
            "ACCESS_TOKEN_TTL_SECS",
            &MAX_ACCESS_TOKEN_TTL_SECS.to_string(),
        )]))
        .unwrap();
        let ttl = longest.access_token_ttl().unwrap();
        assert!(chrono::Utc::now().naive_utc().checked_add_signed(ttl).is_some());

        let unchecked = AuthConfig {
            access_token_ttl_secs: u64::MAX,
            ..AuthConfig::default()
        };
        assert!(unchecked.access_token_ttl().is_none());
    }

    #[test]
    fn test_database_url_is_required() {
        let result = AppConfig::from_lookup(lookup_from(&[]));
        assert!(result.unwrap_err().contains("DATABASE_URL"));
    }

    #[test]
    fn test_from_lookup_applies_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]))
            .unwrap();
        assert!(config.database.is_in_memory());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.http_addr(), "0.0.0.0:8000");
        assert!(!config.json_logs());
    }

    #[test]
    fn test_from_lookup_normalizes_case() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://events.db"),
            ("LOG_LEVEL", "DEBUG"),
            ("LOG_FORMAT", "Json"),
            ("ENVIRONMENT", "Production"),
            ("HTTP_PORT", "9090"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs());
        assert!(config.is_production());
        assert_eq!(config.http_port, 9090);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_level = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("LOG_LEVEL", "verbose"),
        ]));
        assert!(bad_level.unwrap_err().contains("LOG_LEVEL"));

        let bad_port = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HTTP_PORT", "not-a-port"),
        ]));
        assert!(bad_port.unwrap_err().contains("HTTP_PORT"));

        let zero_ttl = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("ACCESS_TOKEN_TTL_SECS", "0"),
        ]));
        assert!(zero_ttl.unwrap_err().contains("ACCESS_TOKEN_TTL_SECS"));

        let huge_ttl = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("ACCESS_TOKEN_TTL_SECS", "100000000000000"),
        ]));
        assert!(huge_ttl.unwrap_err().contains("ACCESS_TOKEN_TTL_SECS"));

        let tiny_memory = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PASSWORD_HASH_MEMORY_KIB", "1"),
        ]));
        assert!(tiny_memory.unwrap_err().contains("PASSWORD_HASH_MEMORY_KIB"));

        let zero_connections = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]));
        assert!(zero_connections.unwrap_err().contains("DATABASE_MAX_CONNECTIONS"));
    }
}
