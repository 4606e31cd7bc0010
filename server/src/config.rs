use serde::Deserialize;

/// Server settings. Sources, lowest priority first: defaults, an optional
/// `todo-server.toml` in the working directory, then `TODO_*` environment
/// variables (`TODO_PORT`, `TODO_HOST`, `TODO_DATABASE_URL`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Config {
    /// Loads configuration from the config file and environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("todo-server").required(false))
            .add_source(config::Environment::with_prefix("TODO"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite://todoApplication.db?mode=rwc".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_port_3000() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:3000");
        assert!(config.database_url.starts_with("sqlite://"));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings = config::Config::builder()
            .set_override("port", 8081)
            .unwrap()
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_url, default_database_url());
    }

    #[test]
    fn load_reads_todo_prefixed_environment() {
        std::env::set_var("TODO_PORT", "8099");
        std::env::set_var("TODO_DATABASE_URL", "sqlite://x.db");
        let loaded = Config::load();
        std::env::remove_var("TODO_PORT");
        std::env::remove_var("TODO_DATABASE_URL");

        let config = loaded.unwrap();
        assert_eq!(config.port, 8099);
        assert_eq!(config.database_url, "sqlite://x.db");
        assert_eq!(config.host, "127.0.0.1");
    }
}
