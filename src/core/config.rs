use std::env;

use crate::shared::constants::{
    DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS, MAX_PAGE_SIZE, MAX_SEARCH_DEBOUNCE_MS,
    MIN_SEARCH_DEBOUNCE_MS,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub locations: LocationsConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Province / municipality / barangay reference data source
#[derive(Debug, Clone, Default)]
pub struct LocationsConfig {
    /// JSON file with `provinces`, `municipalities` and `barangays` arrays.
    /// The built-in tables are used when unset.
    pub seed_path: Option<String>,
}

/// Settings of the list and form screens that talk to the API
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    /// Quiet period after the last keystroke before a search is sent (300-500)
    pub search_debounce_ms: u64,
    pub default_per_page: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        let app = AppConfig::from_env()?;
        let console = ConsoleConfig::from_env(&app)?;

        Ok(Config {
            app,
            swagger: SwaggerConfig::from_env()?,
            locations: LocationsConfig::from_env()?,
            console,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Farmwise API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Farm management back office API".to_string());

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

impl LocationsConfig {
    pub fn from_env() -> Result<Self, String> {
        let seed_path = env::var("LOCATIONS_SEED_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty());

        if let Some(path) = &seed_path {
            if !std::path::Path::new(path).is_file() {
                return Err(format!("LOCATIONS_SEED_PATH does not exist: {}", path));
            }
        }

        Ok(Self { seed_path })
    }
}

impl ConsoleConfig {
    pub fn from_env(app: &AppConfig) -> Result<Self, String> {
        // Defaults to this server's own address
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}", app.server_address()));

        let search_debounce_ms = env::var("SEARCH_DEBOUNCE_MS")
            .unwrap_or_else(|_| DEFAULT_SEARCH_DEBOUNCE_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "SEARCH_DEBOUNCE_MS must be a valid number".to_string())?
            .clamp(MIN_SEARCH_DEBOUNCE_MS, MAX_SEARCH_DEBOUNCE_MS);

        let default_per_page = env::var("DEFAULT_PER_PAGE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse::<i64>()
            .map_err(|_| "DEFAULT_PER_PAGE must be a valid number".to_string())?;
        if !(1..=MAX_PAGE_SIZE).contains(&default_per_page) {
            return Err(format!("DEFAULT_PER_PAGE must be between 1 and {}", MAX_PAGE_SIZE));
        }

        Ok(Self {
            api_base_url,
            search_debounce_ms,
            default_per_page,
        })
    }
}
