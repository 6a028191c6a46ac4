//! Application state shared by every handler

use std::sync::Arc;

use shared::error::AppError;
use sqlx::SqlitePool;

use crate::auth::{JwtConfig, JwtService};
use crate::config::{Config, RegistrationOptions};
use crate::db::{self, Database};
use crate::services::{AdminRegistrationService, ShopRegistrationService};

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Read-only queries
    pub pool: SqlitePool,
    /// Single-connection pool every mutation transaction starts from
    pub writer: SqlitePool,
    /// Bearer token verification
    pub jwt: Arc<JwtService>,
    /// Unrestricted registration service (admin API)
    pub admin: AdminRegistrationService,
    /// Customer-scoped registration service (shop API)
    pub shop: ShopRegistrationService,
}

impl AppState {
    /// Open the database and wire the services from configuration
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let database = db::connect(&config.database_url).await?;
        let jwt = JwtService::with_config(JwtConfig {
            secret: config.jwt_secret.clone(),
            expiration_minutes: config.jwt_expiration_minutes,
            issuer: config.jwt_issuer.clone(),
        });

        Ok(Self::with_database(database, jwt, config.registration.clone()))
    }

    /// Assemble state around already opened pools
    pub fn with_database(
        database: Database,
        jwt: JwtService,
        options: RegistrationOptions,
    ) -> Self {
        Self {
            pool: database.reader,
            writer: database.writer,
            jwt: Arc::new(jwt),
            admin: AdminRegistrationService::new(options.clone()),
            shop: ShopRegistrationService::new(options),
        }
    }
}
