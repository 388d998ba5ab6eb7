use std::str::FromStr;

use crate::errors::AppError;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 1000;
pub const DEFAULT_CMS_DATASET: &str = "production";
pub const DEFAULT_CMS_API_VERSION: &str = "2024-01-01";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Connection settings for the headless CMS.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Required for mutations and for reading drafts; queries of published
    /// content work without it.
    pub token: Option<String>,
    pub use_cdn: bool,
    /// Full base URL replacing `https://<project>.api.sanity.io`.
    pub api_host: Option<String>,
}

impl CmsConfig {
    pub fn base_url(&self) -> String {
        if let Some(host) = &self.api_host {
            return host.trim_end_matches('/').to_string();
        }
        let domain = if self.use_cdn { "apicdn" } else { "api" };
        format!("https://{}.{}.sanity.io", self.project_id, domain)
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: DEFAULT_CMS_DATASET.to_string(),
            api_version: DEFAULT_CMS_API_VERSION.to_string(),
            token: None,
            use_cdn: false,
            api_host: None,
        }
    }
}

/// Process configuration, read once at startup.
///
/// Every value comes from the environment; `start_server` loads `.env` with
/// `dotenvy` before calling [`Config::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub cms: CmsConfig,
    pub http_timeout_seconds: u64,
    pub jwt_secret: Option<String>,
    pub admin_password: Option<String>,
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_env: "development".to_string(),
            port: DEFAULT_PORT,
            database_url: String::new(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            cms: CmsConfig::default(),
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            jwt_secret: None,
            admin_password: None,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGINS.to_string()],
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
        }
    }
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    /// `AppError::EnvError` when `DATABASE_URL` or `CMS_PROJECT_ID` is missing,
    /// or when a numeric/boolean variable cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let require = |key: &str| {
            get(key).ok_or_else(|| AppError::EnvError(format!("{key} must be set")))
        };

        let cms = CmsConfig {
            project_id: require("CMS_PROJECT_ID")?,
            dataset: get("CMS_DATASET").unwrap_or_else(|| DEFAULT_CMS_DATASET.to_string()),
            api_version: get("CMS_API_VERSION")
                .map(|v| v.trim_start_matches('v').to_string())
                .unwrap_or_else(|| DEFAULT_CMS_API_VERSION.to_string()),
            token: get("CMS_API_TOKEN"),
            use_cdn: parse_or("CMS_USE_CDN", get("CMS_USE_CDN"), false)?,
            api_host: get("CMS_API_HOST"),
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            app_env: get("APP_ENV").unwrap_or_else(|| "development".to_string()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            database_url: require("DATABASE_URL")?,
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            cms,
            http_timeout_seconds: parse_or(
                "HTTP_TIMEOUT_SECONDS",
                get("HTTP_TIMEOUT_SECONDS"),
                DEFAULT_HTTP_TIMEOUT_SECONDS,
            )?,
            jwt_secret: get("JWT_SECRET"),
            admin_password: get("ADMIN_PASSWORD"),
            allowed_origins,
            rate_limit_per_minute: parse_or(
                "RATE_LIMIT_PER_MINUTE",
                get("RATE_LIMIT_PER_MINUTE"),
                DEFAULT_RATE_LIMIT_PER_MINUTE,
            )?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, AppError> {
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::EnvError(format!("{key} has an invalid value: {raw}"))),
        None => Ok(default),
    }
}
