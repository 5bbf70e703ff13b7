use serde::{Deserialize, Serialize};
use std::env;

const LOCAL_DATABASE_URL: &str = "sqlite://db.sqlite3?mode=rwc";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Hosted Postgres is only reachable over TLS.
    #[serde(default = "default_true")]
    pub ssl_require: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie signing key material; at least 64 bytes. Empty means a random
    /// key per process, which logs everybody out on restart.
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: i64,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_seconds: default_session_ttl(),
            cookie_secure: false,
            cookie_name: default_cookie_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Superuser created at startup when missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_name")]
    pub first_name: String,
    #[serde(default = "default_admin_name")]
    pub last_name: String,
    pub id_number: String,
    pub phone_number: String,
}

fn default_true() -> bool {
    true
}

fn default_session_ttl() -> i64 {
    // two weeks
    1_209_600
}

fn default_cookie_name() -> String {
    "sessionid".to_string()
}

fn default_admin_name() -> String {
    "Admin".to_string()
}

impl DatabaseConfig {
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    /// The URL handed to the driver, with `sslmode=require` added for Postgres when asked for.
    pub fn connect_url(&self) -> String {
        if self.is_sqlite() || !self.ssl_require || self.url.contains("sslmode=") {
            return self.url.clone();
        }
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}sslmode=require", self.url)
    }
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn database_url_from_env() -> Option<String> {
    get_env("DATABASE_URL").or_else(|| get_env("SUPABASE_DB_URL"))
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{config_path} not found, configuring from the environment");
                Self::from_env_defaults()
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}").into())
    }

    fn from_env_defaults() -> Self {
        Config {
            server: ServerConfig {
                host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: get_env_parse("SERVER_PORT", 8000u16),
            },
            database: DatabaseConfig {
                url: database_url_from_env().unwrap_or_else(|| LOCAL_DATABASE_URL.to_string()),
                max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                ssl_require: get_env_parse("DB_SSL_REQUIRE", true),
            },
            session: SessionConfig::default(),
            cors: CorsConfig::default(),
            admin: None,
        }
    }

    /// Environment variables win over the file.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = get_env("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Some(v) = database_url_from_env() {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("DB_SSL_REQUIRE")
            && let Ok(b) = v.parse()
        {
            self.database.ssl_require = b;
        }
        if let Some(v) = get_env("SECRET_KEY") {
            self.session.secret = v;
        }
        if let Ok(v) = env::var("SESSION_TTL_SECONDS")
            && let Ok(n) = v.parse()
        {
            self.session.ttl_seconds = n;
        }
        if let Ok(v) = env::var("SESSION_COOKIE_SECURE")
            && let Ok(b) = v.parse()
        {
            self.session.cookie_secure = b;
        }
        if let Some(v) = get_env("CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Superuser bootstrap needs at least the credentials.
        if let (Some(email), Some(password)) = (get_env("ADMIN_EMAIL"), get_env("ADMIN_PASSWORD")) {
            let admin = self.admin.get_or_insert_with(|| AdminConfig {
                email: String::new(),
                password: String::new(),
                first_name: default_admin_name(),
                last_name: default_admin_name(),
                id_number: String::new(),
                phone_number: String::new(),
            });
            admin.email = email;
            admin.password = password;
        }
        if let Some(admin) = self.admin.as_mut() {
            if let Some(v) = get_env("ADMIN_ID_NUMBER") {
                admin.id_number = v;
            }
            if let Some(v) = get_env("ADMIN_PHONE_NUMBER") {
                admin.phone_number = v;
            }
        }
    }
}
