/// Configuration management for the API server
///
/// Loaded once at startup from environment variables (and `.env` when
/// present), then shared read-only through `AppState`.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `DATABASE_RUN_MIGRATIONS`: apply migrations at startup (default: true)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `JWT_SECRET`: Secret key for token signing (required, at least 32 chars)
/// - `JWT_ACCESS_TOKEN_EXPIRES_SECS`: Token lifetime (default: 3600)
/// - `PASSWORD_HASH_MEMORY_KIB`, `PASSWORD_HASH_ITERATIONS`,
///   `PASSWORD_HASH_PARALLELISM`: Argon2id costs (default: 65536, 3, 4)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use taskdesk_api::config::Config;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```

use std::{env, fmt, str::FromStr};

use anyhow::Context;
use taskdesk_shared::auth::{jwt::DEFAULT_TTL_SECS, password::PasswordParams};

/// Minimum accepted length for `JWT_SECRET`
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing costs
    pub password: PasswordParams,

    /// Log output format
    pub log_format: LogFormat,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` means any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Apply bundled migrations before serving
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for token signing
    ///
    /// IMPORTANT: This must be kept secret and should be at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_ttl_secs: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .finish()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unknown log format '{}', expected 'pretty' or 'json'", other),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let api_port: u16 = parse_or(&lookup, "API_PORT", 5000)?;
        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .context("DATABASE_URL environment variable is required")?;
        let max_connections: u32 = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?;
        let run_migrations: bool = parse_or(&lookup, "DATABASE_RUN_MIGRATIONS", true)?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET environment variable is required")?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            anyhow::bail!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            );
        }
        let access_token_ttl_secs: i64 =
            parse_or(&lookup, "JWT_ACCESS_TOKEN_EXPIRES_SECS", DEFAULT_TTL_SECS)?;
        if access_token_ttl_secs <= 0 {
            anyhow::bail!("JWT_ACCESS_TOKEN_EXPIRES_SECS must be positive");
        }

        let defaults = PasswordParams::default();
        let password = PasswordParams {
            memory_kib: parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&lookup, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };

        let log_format = parse_or(&lookup, "LOG_FORMAT", LogFormat::default())?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                run_migrations,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                access_token_ttl_secs,
            },
            password,
            log_format,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn cors_permissive(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid value for {}: {}", key, e)),
        None => Ok(default),
    }
}
