use serde::{Deserialize, Serialize};

/// Configuration presence report. Never carries secret values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentReport {
    pub app_env: String,
    pub version: String,
    pub port: u16,
    pub database: DatabaseDiagnostics,
    pub cms: CmsDiagnostics,
    pub auth: AuthDiagnostics,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseDiagnostics {
    pub configured: bool,
    pub host: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsDiagnostics {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub token_configured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthDiagnostics {
    pub jwt_secret_configured: bool,
    pub admin_password_configured: bool,
}
