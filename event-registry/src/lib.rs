//! Event Registry - customer event registration service
//!
//! Two HTTP audiences over one registration store:
//!
//! - **Admin** (`api::admin`): unrestricted CRUD, guarded by catalog permissions
//! - **Shop** (`api::shop`): CRUD scoped to the authenticated customer
//!
//! ```text
//! event-registry/src/
//! ├── api/        # routers, handlers, request logging
//! ├── auth/       # JWT, permission guards, request context, ownership scope
//! ├── services/   # admin and shop registration services
//! ├── db/         # SQLite pool, migrations, repositories
//! ├── utils/      # logger, input validation
//! ├── config.rs   # environment configuration
//! ├── error.rs    # service-layer error bridge
//! └── state.rs    # shared application state
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;
pub mod utils;

pub use api::build_app;
pub use auth::{CurrentUser, JwtService, Permission, RequestContext};
pub use config::{Config, RegistrationOptions};
pub use error::{ServiceError, ServiceResult};
pub use services::{AdminRegistrationService, ShopRegistrationService};
pub use state::AppState;
pub use utils::{init_logger, init_logger_with_file};
