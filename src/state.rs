use std::sync::Arc;

use sqlx::PgPool;

use crate::{cms::CmsClient, config::Config};

/// Client handles shared by every request. Built once in `start_server`.
#[derive(Clone)]
pub struct AppState {
    pub cms: CmsClient,
    pub postgres: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(cms: CmsClient, postgres: PgPool, config: Config) -> Self {
        Self {
            cms,
            postgres,
            config: Arc::new(config),
        }
    }
}
