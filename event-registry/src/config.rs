//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Registration behaviour handed to the admin and shop services at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOptions {
    /// Reject a second registration by the same customer under the same code
    pub enforce_unique_code: bool,
    /// Category stored when the create input leaves it out
    pub default_category: String,
    /// Upper bound on `take` for admin listings and exports
    pub admin_take_limit: u32,
    /// Upper bound on `take` for shop listings
    pub shop_take_limit: u32,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            enforce_unique_code: false,
            default_category: "general".into(),
            admin_take_limit: 1000,
            shop_take_limit: 100,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret shared with the identity provider
    pub jwt_secret: String,
    /// Expected `iss` claim
    pub jwt_issuer: String,
    /// Lifetime of tokens minted by `JwtService::generate_token`
    pub jwt_expiration_minutes: i64,
    /// Log filter (falls back to `RUST_LOG`, then the built-in default)
    pub log_level: Option<String>,
    /// Directory for rotating log files
    pub log_dir: Option<String>,
    /// Emit JSON console logs
    pub log_json: bool,
    pub registration: RegistrationOptions,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let defaults = RegistrationOptions::default();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:event_registry.db?mode=rwc".into()),
            http_port: Self::parse_var("HTTP_PORT", 8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "event-registry".into()),
            jwt_expiration_minutes: Self::parse_var("JWT_EXPIRATION_MINUTES", 1440),
            log_level: std::env::var("LOG_LEVEL").ok().filter(|s| !s.is_empty()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            log_json: Self::parse_var("LOG_JSON", environment == "production"),
            registration: RegistrationOptions {
                enforce_unique_code: Self::parse_var(
                    "REGISTRATION_ENFORCE_UNIQUE_CODE",
                    defaults.enforce_unique_code,
                ),
                default_category: std::env::var("REGISTRATION_DEFAULT_CATEGORY")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(defaults.default_category),
                admin_take_limit: Self::parse_var(
                    "ADMIN_LIST_TAKE_LIMIT",
                    defaults.admin_take_limit,
                )
                .max(1),
                shop_take_limit: Self::parse_var(
                    "SHOP_LIST_TAKE_LIMIT",
                    defaults.shop_take_limit,
                )
                .max(1),
            },
            environment,
        })
    }
}
