use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
    /// Directory holding the browser UI; served for unknown GET paths when present.
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8080, worker_threads: Some(4), static_dir: Some("frontend".into()) }
    }
}

/// Connection settings for the `suivi` storage.
///
/// When `url` is set it is used verbatim (any backend sea-orm supports);
/// otherwise a MySQL URL is assembled from the individual fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
    pub use_tls: bool,
    pub provision_database_on_startup: bool,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub sqlx_logging: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".into(),
            user: "root".into(),
            password: String::new(),
            database: "suivi".into(),
            port: 3306,
            use_tls: false,
            provision_database_on_startup: false,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 10 }
fn default_idle_timeout() -> u64 { 600 }
fn default_acquire_timeout() -> u64 { 10 }

/// Load `CONFIG_PATH` (default `config.toml`); a missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay environment variables using the deployment names of the
    /// hosting platform (`PORT`, `MYSQLHOST`, ...).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("SERVER_HOST") { self.server.host = host; }
        if let Some(port) = get("PORT") { self.server.port = parse_port("PORT", &port)?; }
        if let Some(w) = get("TOKIO_WORKER_THREADS") {
            let w = w.trim().parse::<usize>().map_err(|_| anyhow!("TOKIO_WORKER_THREADS must be a positive integer"))?;
            self.server.worker_threads = Some(w);
        }
        if let Some(dir) = get("STATIC_DIR") { self.server.static_dir = Some(dir); }

        let db = &mut self.database;
        if let Some(url) = get("DATABASE_URL") { db.url = Some(url); }
        if let Some(host) = get("MYSQLHOST") { db.host = host; }
        if let Some(user) = get("MYSQLUSER") { db.user = user; }
        // an empty password is legitimate, so only absence keeps the configured value
        if let Some(password) = lookup("MYSQLPASSWORD") { db.password = password; }
        if let Some(name) = get("MYSQLDATABASE") { db.database = name; }
        if let Some(port) = get("MYSQLPORT") { db.port = parse_port("MYSQLPORT", &port)?; }
        if let Some(tls) = get("MYSQL_SSL") { db.use_tls = parse_flag("MYSQL_SSL", &tls)?; }
        if let Some(p) = get("DB_PROVISION") { db.provision_database_on_startup = parse_flag("DB_PROVISION", &p)?; }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if matches!(self.static_dir.as_deref(), Some(d) if d.trim().is_empty()) {
            self.static_dir = None;
        }
        Ok(())
    }
}

impl DatabaseSettings {
    fn explicit_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Whether the URL is assembled from host/user/password/database.
    pub fn is_assembled(&self) -> bool {
        self.explicit_url().is_none()
    }

    /// Connection URL for the pool.
    pub fn connection_url(&self) -> String {
        match self.explicit_url() {
            Some(url) => url.to_string(),
            None => format!("{}/{}?{}", self.server_base(), urlencoding::encode(&self.database), self.tls_param()),
        }
    }

    /// URL of the MySQL server without selecting a database, used to create
    /// the database itself. `None` when an explicit URL is configured.
    pub fn server_url(&self) -> Option<String> {
        self.is_assembled().then(|| format!("{}?{}", self.server_base(), self.tls_param()))
    }

    fn server_base(&self) -> String {
        let credentials = if self.password.is_empty() {
            urlencoding::encode(&self.user).into_owned()
        } else {
            format!("{}:{}", urlencoding::encode(&self.user), urlencoding::encode(&self.password))
        };
        format!("mysql://{}@{}:{}", credentials, self.host.trim(), self.port)
    }

    fn tls_param(&self) -> &'static str {
        // REQUIRED encrypts without verifying the server certificate
        if self.use_tls { "ssl-mode=REQUIRED" } else { "ssl-mode=DISABLED" }
    }

    pub fn validate(&self) -> Result<()> {
        match self.explicit_url() {
            Some(url) => {
                let lower = url.to_lowercase();
                let known = ["mysql://", "mariadb://", "postgres://", "postgresql://", "sqlite:"];
                if !known.iter().any(|p| lower.starts_with(p)) {
                    return Err(anyhow!("database.url must start with mysql://, mariadb://, postgres:// or sqlite:"));
                }
            }
            None => {
                if self.host.trim().is_empty() {
                    return Err(anyhow!("database.host is empty; set it in config.toml or MYSQLHOST"));
                }
                if self.user.trim().is_empty() {
                    return Err(anyhow!("database.user is empty; set it in config.toml or MYSQLUSER"));
                }
                if self.database.trim().is_empty() {
                    return Err(anyhow!("database.database is empty; set it in config.toml or MYSQLDATABASE"));
                }
                if self.port == 0 {
                    return Err(anyhow!("database.port must be in 1..=65535"));
                }
            }
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

fn parse_port(key: &str, raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(anyhow!("{key} must be a port number in 1..=65535, got {raw:?}")),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{key} must be a boolean (true/false), got {raw:?}")),
    }
}
