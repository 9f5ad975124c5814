use std::env;
use std::fmt;

const DEFAULT_MUNICIPALITY: &str = "Kirkland";
const DEFAULT_MUNICIPALITY_CODE: &str = "66102";

/// Distinguishes runtime behavior for different stages of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub projection: ProjectionConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let default_municipality = env::var("ROLE_DEFAULT_MUNICIPALITY")
            .map(|value| value.trim().to_string())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MUNICIPALITY.to_string());

        let municipality_code = env::var("ROLE_MUNICIPALITY_CODE")
            .unwrap_or_else(|_| DEFAULT_MUNICIPALITY_CODE.to_string());
        let municipality_code = validate_municipality_code(municipality_code.trim())?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            projection: ProjectionConfig {
                default_municipality,
                municipality_code,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings shared by every projection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Municipality used for composed addresses when the caller names none.
    pub default_municipality: String,
    /// Expected `RLM01A` code of incoming roll documents.
    pub municipality_code: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            default_municipality: DEFAULT_MUNICIPALITY.to_string(),
            municipality_code: DEFAULT_MUNICIPALITY_CODE.to_string(),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn validate_municipality_code(value: &str) -> Result<String, ConfigError> {
    if value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidMunicipalityCode(value.to_string()))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMunicipalityCode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMunicipalityCode(value) => write!(
                f,
                "ROLE_MUNICIPALITY_CODE must be a 5-digit geographic code, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("ROLE_DEFAULT_MUNICIPALITY");
        env::remove_var("ROLE_MUNICIPALITY_CODE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.projection, ProjectionConfig::default());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_projection_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "CI");
        env::set_var("ROLE_DEFAULT_MUNICIPALITY", " Pointe-Claire ");
        env::set_var("ROLE_MUNICIPALITY_CODE", "66097");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.projection.default_municipality, "Pointe-Claire");
        assert_eq!(config.projection.municipality_code, "66097");
        reset_env();
    }

    #[test]
    fn rejects_malformed_municipality_code() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ROLE_MUNICIPALITY_CODE", "661O2");
        let err = AppConfig::load().expect_err("letter O is not a digit");
        assert!(matches!(err, ConfigError::InvalidMunicipalityCode(ref code) if code == "661O2"));
        reset_env();
    }
}
