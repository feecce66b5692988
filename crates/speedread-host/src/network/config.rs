use serde::Deserialize;

fn default_port() -> u16 {
    8787
}

fn default_allowed_origin() -> String {
    String::from("*")
}

fn default_max_content_size() -> usize {
    100_000
}

fn default_content_ttl_seconds() -> u64 {
    86_400
}

fn default_rate_limit_max() -> usize {
    10
}

fn default_rate_limit_window_seconds() -> u64 {
    60
}

/// Content service settings, read from `PORT`, `ALLOWED_ORIGIN`,
/// `MAX_CONTENT_SIZE`, `CONTENT_TTL_SECONDS`, `RATE_LIMIT_MAX` and
/// `RATE_LIMIT_WINDOW_SECONDS`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ContentServiceConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    /// Upper bound in bytes for both the request body and the text itself.
    #[serde(default = "default_max_content_size")]
    pub max_content_size: usize,
    #[serde(default = "default_content_ttl_seconds")]
    pub content_ttl_seconds: u64,
    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max: usize,
    #[serde(default = "default_rate_limit_window_seconds")]
    pub rate_limit_window_seconds: u64,
}

impl Default for ContentServiceConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allowed_origin: default_allowed_origin(),
            max_content_size: default_max_content_size(),
            content_ttl_seconds: default_content_ttl_seconds(),
            rate_limit_max: default_rate_limit_max(),
            rate_limit_window_seconds: default_rate_limit_window_seconds(),
        }
    }
}

impl ContentServiceConfig {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, envy::Error> {
        let _ = dotenvy::dotenv();
        envy::from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn ttl_ms(&self) -> u64 {
        self.content_ttl_seconds.saturating_mul(1_000)
    }

    pub fn rate_limit_window_ms(&self) -> u64 {
        self.rate_limit_window_seconds.saturating_mul(1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ContentServiceConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, ContentServiceConfig::default());
        assert_eq!(config.port, 8787);
        assert_eq!(config.ttl_ms(), 86_400_000);
    }

    #[test]
    fn variables_override_defaults() {
        let config = ContentServiceConfig::from_vars(vars(&[
            ("PORT", "9000"),
            ("ALLOWED_ORIGIN", "https://read.example"),
            ("RATE_LIMIT_MAX", "3"),
            ("RATE_LIMIT_WINDOW_SECONDS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.allowed_origin, "https://read.example");
        assert_eq!(config.rate_limit_max, 3);
        assert_eq!(config.rate_limit_window_ms(), 10_000);
        assert_eq!(config.max_content_size, 100_000);
    }

    #[test]
    fn malformed_number_is_an_error() {
        assert!(ContentServiceConfig::from_vars(vars(&[("PORT", "eighty")])).is_err());
    }
}
