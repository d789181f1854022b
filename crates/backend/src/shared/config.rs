use contracts::shared::api::DEFAULT_PROXY_PREFIX;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory with the built frontend (trunk `dist/`)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    /// Public path prefix handled by the proxy
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Base URL of the internal quoting API
    pub internal_base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// When non-empty, forwarded paths must start with one of these
    #[serde(default)]
    pub allowed_prefixes: Vec<String>,
}

impl ProxyConfig {
    /// The bundled UI only knows [`DEFAULT_PROXY_PREFIX`]
    pub fn serves_ui_prefix(&self) -> bool {
        self.prefix == DEFAULT_PROXY_PREFIX
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_static_dir() -> String {
    "dist".to_string()
}

fn default_prefix() -> String {
    DEFAULT_PROXY_PREFIX.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
bind = "0.0.0.0:3000"
static_dir = "dist"

[proxy]
prefix = "/api/proxy"
internal_base_url = "http://127.0.0.1:8000"
timeout_ms = 10000
allowed_prefixes = []
"#;

pub const ENV_INTERNAL_API_URL: &str = "COTIZADOR_INTERNAL_API_URL";
pub const ENV_PROXY_TIMEOUT_MS: &str = "COTIZADOR_PROXY_TIMEOUT_MS";
pub const ENV_BIND: &str = "COTIZADOR_BIND";

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Environment variables override the file afterwards.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = load_file_or_default()?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    normalize(&mut config);
    Ok(config)
}

fn load_file_or_default() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_INTERNAL_API_URL).filter(|v| !v.trim().is_empty()) {
        config.proxy.internal_base_url = url.trim().to_string();
    }
    if let Some(raw) = lookup(ENV_PROXY_TIMEOUT_MS) {
        config.proxy.timeout_ms = raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} must be a number of milliseconds: {}", ENV_PROXY_TIMEOUT_MS, e))?;
    }
    if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.trim().is_empty()) {
        config.server.bind = bind.trim().to_string();
    }
    Ok(())
}

/// Trailing slashes off the base URL and prefix, leading slash on the prefix
fn normalize(config: &mut Config) {
    let base = config.proxy.internal_base_url.trim_end_matches('/');
    config.proxy.internal_base_url = base.to_string();

    let prefix = config.proxy.prefix.trim().trim_end_matches('/');
    config.proxy.prefix = if prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{}", prefix)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn default_config() -> Config {
        toml::from_str(DEFAULT_CONFIG).unwrap()
    }

    #[test]
    fn test_default_config_loads() {
        let config = default_config();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.proxy.prefix, "/api/proxy");
        assert_eq!(config.proxy.timeout_ms, 10_000);
        assert!(config.proxy.allowed_prefixes.is_empty());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config =
            toml::from_str("[proxy]\ninternal_base_url = \"http://api:8000\"\n").unwrap();
        assert_eq!(config.proxy.timeout_ms, 10_000);
        assert_eq!(config.server.static_dir, "dist");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_INTERNAL_API_URL, "http://cotizador-api:9000/"),
            (ENV_PROXY_TIMEOUT_MS, "2500"),
        ]
        .into_iter()
        .collect();

        let mut config = default_config();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();
        normalize(&mut config);

        assert_eq!(config.proxy.internal_base_url, "http://cotizador-api:9000");
        assert_eq!(config.proxy.timeout_ms, 2500);
        assert_eq!(config.server.bind, "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_timeout_env_is_an_error() {
        let mut config = default_config();
        let result = apply_env_overrides(&mut config, |k| {
            (k == ENV_PROXY_TIMEOUT_MS).then(|| "diez".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_prefix() {
        let mut config = default_config();
        config.proxy.prefix = "api/proxy/".to_string();
        normalize(&mut config);
        assert_eq!(config.proxy.prefix, "/api/proxy");
    }

    #[test]
    fn test_custom_prefix_is_flagged_against_ui() {
        let mut config = default_config();
        assert!(config.proxy.serves_ui_prefix());

        config.proxy.prefix = "cotizador/proxy/".to_string();
        normalize(&mut config);
        assert_eq!(config.proxy.prefix, "/cotizador/proxy");
        assert!(!config.proxy.serves_ui_prefix());
    }
}
