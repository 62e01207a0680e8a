use std::path::PathBuf;

/// Server configuration
///
/// Every field can be overridden through an environment variable:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/foodify | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | SESSION_TTL_MINUTES | 1440 | Session lifetime |
/// | AUTO_CONFIRM_SECS | 60 | Age at which pending orders auto-confirm |
/// | ESTIMATED_DELIVERY_MINUTES | 35 | Delivery estimate added at checkout |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Session lifetime in minutes
    pub session_ttl_minutes: i64,
    /// Pending orders older than this are confirmed automatically
    pub auto_confirm_secs: u64,
    /// Minutes added to the order time for the delivery estimate
    pub estimated_delivery_minutes: i64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/foodify".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1440),
            auto_confirm_secs: std::env::var("AUTO_CONFIRM_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(60),
            estimated_delivery_minutes: std::env::var("ESTIMATED_DELIVERY_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(35),
        }
    }

    /// Override the work dir and port, commonly used in tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
            .join("database")
            .join("storefront.redb")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
