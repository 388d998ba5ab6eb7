use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    config::Config,
    errors::{AppError, ErrorResponse},
    models::admin::{AdminClaims, LoginResponse},
    state::AppState,
};

const ADMIN_ROLE: &str = "admin";
const TOKEN_TTL_HOURS: i64 = 12;

/// Extractor guarding the admin routes.
pub struct AdminAuth(pub AdminClaims);

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Unauthorized("Missing or invalid Authorization header".into())
                        .to_response()
                })?;

        verify_admin_token(bearer.token(), &state.config)
            .map(AdminAuth)
            .map_err(|e| {
                tracing::warn!("Rejected admin token: {}", e);
                e.to_response()
            })
    }
}

pub fn verify_admin_token(token: &str, config: &Config) -> Result<AdminClaims, AppError> {
    let secret = jwt_secret(config)?;
    let token_data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    if token_data.claims.role != ADMIN_ROLE {
        return Err(AppError::Unauthorized("Admin role required".into()));
    }

    Ok(token_data.claims)
}

pub fn generate_admin_token(config: &Config) -> Result<LoginResponse, AppError> {
    let secret = jwt_secret(config)?;
    let now = Utc::now();
    let expires_at = (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;

    let claims = AdminClaims {
        sub: ADMIN_ROLE.to_string(),
        role: ADMIN_ROLE.to_string(),
        iat: now.timestamp() as usize,
        exp: expires_at,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(LoginResponse { token, expires_at })
}

/// Checks the admin password and mints a token.
pub fn login(password: &str, config: &Config) -> Result<LoginResponse, AppError> {
    let expected = config
        .admin_password
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("Admin login is disabled".into()))?;

    if !constant_time_eq(password.as_bytes(), expected.as_bytes()) {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    generate_admin_token(config)
}

fn jwt_secret(config: &Config) -> Result<&str, AppError> {
    config
        .jwt_secret
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("Admin access is not configured".into()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            jwt_secret: Some("test-secret".into()),
            admin_password: Some("courtside".into()),
            ..Config::default()
        }
    }

    #[test]
    fn login_issues_verifiable_token() {
        let config = config();
        let response = login("courtside", &config).unwrap();
        let claims = verify_admin_token(&response.token, &config).unwrap();

        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp, response.expires_at);
    }

    #[test]
    fn wrong_password_is_rejected() {
        assert!(matches!(
            login("airball", &config()),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issued = generate_admin_token(&config()).unwrap();
        let other = Config {
            jwt_secret: Some("different".into()),
            ..config()
        };

        assert!(verify_admin_token(&issued.token, &other).is_err());
    }

    #[test]
    fn missing_secret_disables_admin() {
        let config = Config::default();
        assert!(matches!(
            generate_admin_token(&config),
            Err(AppError::Unauthorized(_))
        ));
    }
}
