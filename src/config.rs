use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub routes: RouteConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub assist: AssistConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// Allowed origin for the admin SPA; empty disables CORS
    #[serde(default)]
    pub cors_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Path to a MaxMind GeoLite2-City.mmdb file; unset falls back to the API
    #[serde(default)]
    pub maxminddb_path: Option<String>,
    #[serde(default = "default_geoip_api_url")]
    pub geoip_api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistConfig {
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_storage_backend() -> String {
    "sqlite".to_string()
}

fn default_database_url() -> String {
    "sqlite://linkrotator.db?mode=rwc".to_string()
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_geoip_api_url() -> String {
    "http://ip-api.com/json/{ip}?fields=status,countryCode,city".to_string()
}

fn default_gateway_url() -> String {
    "https://ai.gateway.lovable.dev/v1/chat/completions".to_string()
}

fn default_text_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "google/gemini-2.5-flash-image-preview".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            routes: RouteConfig::default(),
            analytics: AnalyticsConfig::default(),
            assist: AssistConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            cors_origin: String::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            database_url: default_database_url(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            admin_prefix: default_admin_prefix(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            maxminddb_path: None,
            geoip_api_url: default_geoip_api_url(),
        }
    }
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            api_key: String::new(),
            text_model: default_text_model(),
            image_model: default_image_model(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file with environment variable fallback
    pub fn load() -> Self {
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    fn load_from_file() -> Self {
        let config_paths = [
            "config.toml",
            "linkrotator.toml",
            "config/config.toml",
            "/etc/linkrotator/config.toml",
        ];

        for path in &config_paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<Config>(&content) {
                        Ok(config) => {
                            debug!("Successfully loaded config from: {}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    /// Override configuration with environment variables
    fn override_with_env(&mut self) {
        // Server config
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(cpu_count) = env::var("CPU_COUNT") {
            if let Ok(count) = cpu_count.parse() {
                self.server.cpu_count = count;
            }
        }
        if let Ok(origin) = env::var("CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }

        // Storage config
        if let Ok(backend) = env::var("STORAGE_BACKEND") {
            self.storage.backend = backend;
        }
        if let Ok(database_url) = env::var("DATABASE_URL") {
            self.storage.database_url = database_url;
        }

        // Route config
        if let Ok(admin_prefix) = env::var("ADMIN_ROUTE_PREFIX") {
            self.routes.admin_prefix = admin_prefix;
        }
        if let Ok(api_prefix) = env::var("API_ROUTE_PREFIX") {
            self.routes.api_prefix = api_prefix;
        }

        // Analytics config
        if let Ok(path) = env::var("MAXMINDDB_PATH") {
            self.analytics.maxminddb_path = Some(path);
        }
        if let Ok(url) = env::var("GEOIP_API_URL") {
            self.analytics.geoip_api_url = url;
        }

        // Assist config
        if let Ok(url) = env::var("ASSIST_GATEWAY_URL") {
            self.assist.gateway_url = url;
        }
        if let Ok(key) = env::var("ASSIST_API_KEY") {
            self.assist.api_key = key;
        }
        if let Ok(model) = env::var("ASSIST_TEXT_MODEL") {
            self.assist.text_model = model;
        }
        if let Ok(model) = env::var("ASSIST_IMAGE_MODEL") {
            self.assist.image_model = model;
        }

        // Logging config
        if let Ok(log_level) = env::var("RUST_LOG") {
            self.logging.level = log_level;
        }
    }

    /// Generate a sample TOML configuration file
    pub fn generate_sample_config() -> String {
        let sample_config = Config::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

/// Initialize the global configuration
pub fn init_config() {
    CONFIG.get_or_init(Config::load);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, "sqlite");
        assert_eq!(config.routes.admin_prefix, "/admin");
        assert_eq!(config.routes.api_prefix, "/api");
        assert!(config.analytics.maxminddb_path.is_none());
        assert!(config.analytics.geoip_api_url.contains("{ip}"));
    }

    #[test]
    fn test_sample_config_parses_back() {
        let sample = Config::generate_sample_config();
        let parsed: Config = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.server.port, 8080);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(parsed.server.port, 9000);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.storage.backend, "sqlite");
    }
}
