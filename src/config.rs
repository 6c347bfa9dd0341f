//! Process settings read from the environment (and `.env`, when present).

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Worker thread count; actix picks one per core when unset.
    pub workers: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: None,
        }
    }
}

impl AppConfig {
    /// Load `.env` if there is one, then read the process environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => log::info!("No .env file found, using process environment"),
            Err(e) => log::warn!("Ignoring unreadable .env file: {e}"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Bad values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => config.port = p,
                Err(_) => log::warn!("PORT '{port}' is not a valid port, using {DEFAULT_PORT}"),
            }
        }

        if let Some(workers) = lookup("WORKERS") {
            match workers.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.workers = Some(n),
                _ => log::warn!("WORKERS '{workers}' is not a positive number, ignoring"),
            }
        }

        config
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
