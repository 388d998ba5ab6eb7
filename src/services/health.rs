use std::{future::Future, time::Instant};

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    cms::CmsClient,
    db,
    errors::AppError,
    models::health::{ComponentHealth, ComponentStatus, HealthChecks, HealthReport},
};

/// Healthy means the database answers; the CMS result is informational.
pub async fn check_health(cms: &CmsClient, postgres: &PgPool) -> HealthReport {
    let (database, cms) = tokio::join!(
        timed("database", db::health::ping(postgres)),
        timed("cms", cms.ping()),
    );

    HealthReport {
        healthy: database.is_up(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        checks: HealthChecks { database, cms },
    }
}

async fn timed<F>(component: &str, check: F) -> ComponentHealth
where
    F: Future<Output = Result<(), AppError>>,
{
    let started = Instant::now();
    let result = check.await;
    let latency_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(()) => ComponentHealth {
            status: ComponentStatus::Up,
            latency_ms,
            error: None,
        },
        Err(e) => {
            tracing::warn!("Health check for {} failed: {}", component, e);
            ComponentHealth {
                status: ComponentStatus::Down,
                latency_ms,
                error: Some(format!("{component} unreachable")),
            }
        }
    }
}
