use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means the service runs without storage.
    pub database_url: Option<String>,
    /// Overrides the database named in `database_url` when set.
    pub database_name: Option<String>,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: get("DATABASE_URL"),
            database_name: get("DATABASE_NAME"),
            max_connections: get("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = from_pairs(&[]).unwrap();
        assert!(config.database_url.is_none());
        assert!(config.database_name.is_none());
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn reads_database_settings() {
        let config = from_pairs(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("DATABASE_NAME", "catalog"),
            ("PORT", "9090"),
        ])
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/app"));
        assert_eq!(config.database_name.as_deref(), Some("catalog"));
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = from_pairs(&[("DATABASE_URL", "  "), ("DATABASE_NAME", "")]).unwrap();
        assert!(config.database_url.is_none());
        assert!(config.database_name.is_none());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = from_pairs(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
