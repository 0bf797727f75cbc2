//! Configuration module
//!
//! Environment-driven configuration for the API: server, database, storage
//! backend, identity provider, and upload limits. `Config::from_env` loads a
//! `.env` file when present and applies defaults; `validate` fails fast on
//! combinations that cannot work (missing platform credentials, incomplete
//! local storage settings).

use std::env;

use crate::storage_types::StorageBackend;

const DEFAULT_SERVER_PORT: u16 = 3001;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PUBLIC_BUCKET: &str = "post-images";
const DEFAULT_MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,

    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,

    // Object storage
    pub storage_backend: StorageBackend,
    pub supabase_url: Option<String>,
    pub supabase_service_role_key: Option<String>,
    pub storage_bucket: String,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,

    // Uploads
    pub max_image_size_bytes: usize,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("Missing DATABASE_URL in environment"))?;

        let storage_backend = env_or("STORAGE_BACKEND", "supabase")
            .parse::<StorageBackend>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let cors_origins = env_or("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            server_port: env_parse_or("PORT", DEFAULT_SERVER_PORT),
            environment: env_or("ENVIRONMENT", "development"),
            cors_origins,
            database_url,
            db_max_connections: env_parse_or("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            db_timeout_seconds: env_parse_or("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS),
            storage_backend,
            supabase_url: env_opt("SUPABASE_URL"),
            supabase_service_role_key: env_opt("SUPABASE_SERVICE_ROLE_KEY"),
            storage_bucket: env_or("SUPABASE_PUBLIC_BUCKET", DEFAULT_PUBLIC_BUCKET),
            local_storage_path: env_opt("LOCAL_STORAGE_PATH"),
            local_storage_base_url: env_opt("LOCAL_STORAGE_BASE_URL"),
            max_image_size_bytes: env_parse_or(
                "MAX_IMAGE_SIZE_BYTES",
                DEFAULT_MAX_IMAGE_SIZE_BYTES,
            ),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Fail fast on configuration that cannot work at runtime.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        // The identity provider lives on the platform; its URL and service
        // key are required regardless of the storage backend.
        if self.supabase_url.is_none() {
            anyhow::bail!("Missing SUPABASE_URL in environment");
        }
        if self.supabase_service_role_key.is_none() {
            anyhow::bail!("Missing SUPABASE_SERVICE_ROLE_KEY in environment");
        }

        if self.storage_backend == StorageBackend::Local {
            if self.local_storage_path.is_none() {
                anyhow::bail!("LOCAL_STORAGE_PATH must be set for the local storage backend");
            }
            if self.local_storage_base_url.is_none() {
                anyhow::bail!("LOCAL_STORAGE_BASE_URL must be set for the local storage backend");
            }
        }

        if self.max_image_size_bytes == 0 {
            anyhow::bail!("MAX_IMAGE_SIZE_BYTES must be greater than zero");
        }

        Ok(())
    }
}
