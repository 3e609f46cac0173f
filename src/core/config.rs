use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
    pub template_dir: PathBuf,
    pub seed_sample_data: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Session cookie and password hashing settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_cookie_name: String,
    pub session_ttl: Duration,
    pub secure_cookies: bool,
    pub session_cleanup_interval: Duration,
    pub password_hash_iterations: u32,
}

/// Local storage for user uploads (profile pictures)
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory uploaded files are written to
    pub root: PathBuf,
    /// URL prefix the media directory is served under
    pub url_prefix: String,
    /// Maximum accepted upload size in bytes
    pub max_upload_size: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            media: MediaConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format!("{} must be a boolean, got '{}'", name, other)),
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let template_dir =
            PathBuf::from(env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string()));

        let seed_sample_data = parse_bool(
            "SEED_SAMPLE_DATA",
            &env::var("SEED_SAMPLE_DATA").unwrap_or_default(),
        )?;

        Ok(Self {
            host,
            port,
            max_request_body_size,
            template_dir,
            seed_sample_data,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

/// Cookie names are RFC 6265 tokens: visible ASCII without separators
fn check_cookie_name(name: &str) -> Result<(), String> {
    const SEPARATORS: &str = "()<>@,;:\\\"/[]?={}";
    let valid = name
        .chars()
        .all(|c| c.is_ascii_graphic() && !SEPARATORS.contains(c));
    if valid {
        Ok(())
    } else {
        Err(format!(
            "SESSION_COOKIE_NAME '{}' is not a valid cookie name",
            name
        ))
    }
}

impl AuthConfig {
    const DEFAULT_SESSION_COOKIE_NAME: &'static str = "sessionid";
    const DEFAULT_SESSION_TTL_SECS: u64 = 1_209_600; // 2 weeks
    const DEFAULT_SESSION_CLEANUP_INTERVAL_SECS: u64 = 3600; // 1 hour
    const DEFAULT_PASSWORD_HASH_ITERATIONS: u32 = 600_000;

    pub fn from_env() -> Result<Self, String> {
        let session_cookie_name = env::var("SESSION_COOKIE_NAME")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_SESSION_COOKIE_NAME.to_string());
        check_cookie_name(&session_cookie_name)?;

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SESSION_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_SECS must be a valid number".to_string())?;

        let secure_cookies = parse_bool(
            "SESSION_COOKIE_SECURE",
            &env::var("SESSION_COOKIE_SECURE").unwrap_or_default(),
        )?;

        let session_cleanup_interval_secs = env::var("SESSION_CLEANUP_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SESSION_CLEANUP_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_CLEANUP_INTERVAL_SECS must be a valid number".to_string())?;

        let password_hash_iterations = env::var("PASSWORD_HASH_ITERATIONS")
            .unwrap_or_else(|_| Self::DEFAULT_PASSWORD_HASH_ITERATIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "PASSWORD_HASH_ITERATIONS must be a valid number".to_string())?;

        if password_hash_iterations == 0 {
            return Err("PASSWORD_HASH_ITERATIONS must be greater than zero".to_string());
        }

        Ok(Self {
            session_cookie_name,
            session_ttl: Duration::from_secs(session_ttl_secs),
            secure_cookies,
            session_cleanup_interval: Duration::from_secs(session_cleanup_interval_secs.max(1)),
            password_hash_iterations,
        })
    }
}

impl MediaConfig {
    const DEFAULT_MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024; // 5MB

    pub fn from_env() -> Result<Self, String> {
        let root = PathBuf::from(env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string()));

        let url_prefix = env::var("MEDIA_URL")
            .unwrap_or_else(|_| "/media".to_string())
            .trim_end_matches('/')
            .to_string();
        if !url_prefix.starts_with('/') {
            return Err("MEDIA_URL must start with '/'".to_string());
        }

        let max_upload_size = env::var("MAX_UPLOAD_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_UPLOAD_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_UPLOAD_SIZE must be a valid number".to_string())?;

        Ok(Self {
            root,
            url_prefix,
            max_upload_size,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Rango".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "HTML endpoints of the Rango category directory".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
