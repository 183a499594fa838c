/// Configuration management for Blog Service
///
/// Settings are read from environment variables (a `.env` file is loaded by
/// `main` through dotenvy). Every value has a development default except the
/// production guards on the JWT secret and CORS origins.
use serde::{Deserialize, Serialize};

const DEV_JWT_SECRET: &str = "dev-only-insecure-jwt-secret";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Token validation and login redirect settings
    pub auth: AuthConfig,
    /// Listing page size
    pub pagination: PaginationConfig,
    /// Index render cache
    pub cache: CacheConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the identity service
    pub jwt_secret: String,
    /// Where anonymous users are sent; `?next=` is appended
    pub login_url: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("login_url", &self.login_url)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub page_size: usize,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub index_ttl_secs: u64,
    /// Token required by the cache-clear endpoint; the endpoint is closed when unset
    pub admin_token: Option<String>,
}

impl std::fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheConfig")
            .field("index_ttl_secs", &self.index_ttl_secs)
            .field(
                "admin_token",
                &self.admin_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let is_production = app_env.eq_ignore_ascii_case("production");

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("BLOG_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("BLOG_SERVICE_PORT", 8080)?,
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if is_production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if is_production && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/blog".to_string()),
                max_connections: parse_env_or_default("DATABASE_MAX_CONNECTIONS", 10)?,
                run_migrations: parse_env_or_default("DATABASE_RUN_MIGRATIONS", true)?,
            },
            auth: {
                let jwt_secret = match std::env::var("JWT_SECRET") {
                    Ok(secret) if !secret.trim().is_empty() => secret,
                    _ if is_production => {
                        return Err("JWT_SECRET must be set in production".to_string())
                    }
                    _ => DEV_JWT_SECRET.to_string(),
                };
                if is_production && jwt_secret == DEV_JWT_SECRET {
                    return Err("JWT_SECRET cannot use the development default in production".to_string());
                }

                AuthConfig {
                    jwt_secret,
                    login_url: std::env::var("LOGIN_URL")
                        .unwrap_or_else(|_| "/auth/login/".to_string()),
                }
            },
            pagination: {
                // PAGE_NUM is the historical name of the setting
                let page_size = match std::env::var("PAGE_SIZE").or_else(|_| std::env::var("PAGE_NUM")) {
                    Ok(raw) => raw
                        .parse::<usize>()
                        .map_err(|e| format!("Failed to parse PAGE_SIZE='{}': {}", raw, e))?,
                    Err(_) => PaginationConfig::default().page_size,
                };
                if page_size == 0 {
                    return Err("PAGE_SIZE must be greater than zero".to_string());
                }
                PaginationConfig { page_size }
            },
            cache: CacheConfig {
                index_ttl_secs: parse_env_or_default("INDEX_CACHE_TTL_SECS", 20)?,
                admin_token: std::env::var("ADMIN_TOKEN")
                    .ok()
                    .filter(|token| !token.trim().is_empty()),
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_or_default_falls_back_when_unset() {
        let value: u64 = parse_env_or_default("BLOG_SERVICE_TEST_UNSET_KEY", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let auth = AuthConfig {
            jwt_secret: "super-secret".to_string(),
            login_url: "/auth/login/".to_string(),
        };
        let rendered = format!("{:?}", auth);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("/auth/login/"));
    }
}
