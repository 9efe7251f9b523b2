use crate::utils::error::{CheckoutError, Result};
use crate::utils::validation::{
    validate_database_url, validate_non_empty_string, validate_range, validate_unique, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub stores: StoreConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_true")]
    pub bootstrap_schema: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    #[default]
    Static,
    Database,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub resolver: ResolverKind,
    #[serde(default = "default_tokens")]
    pub tokens: Vec<TokenEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    #[serde(default)]
    pub beta: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

/// Placeholder credentials until every store is registered in the `stores` table.
pub fn default_tokens() -> Vec<TokenEntry> {
    vec![
        TokenEntry {
            token: "YouShallPass".to_string(),
            beta: true,
        },
        TokenEntry {
            token: "BetaTester".to_string(),
            beta: true,
        },
        TokenEntry {
            token: "NotBetaTester".to_string(),
            beta: false,
        },
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            bootstrap_schema: true,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverKind::Static,
            tokens: default_tokens(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CheckoutError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CheckoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATABASE_URL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CheckoutError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;

        validate_database_url("database.url", &self.database.url)?;
        validate_range("database.max_connections", self.database.max_connections, 1, 100)?;

        if self.stores.resolver == ResolverKind::Static {
            if self.stores.tokens.is_empty() {
                return Err(CheckoutError::MissingConfigError {
                    field: "stores.tokens".to_string(),
                });
            }
            for entry in &self.stores.tokens {
                validate_non_empty_string("stores.tokens.token", &entry.token)?;
            }
            validate_unique(
                "stores.tokens.token",
                self.stores.tokens.iter().map(|entry| entry.token.as_str()),
            )?;
        }

        if let Some(level) = self.log_level() {
            if !LOG_LEVELS.contains(&level) {
                return Err(CheckoutError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = ServiceConfig::from_toml_str("").unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert!(config.database.bootstrap_schema);
        assert_eq!(config.stores.resolver, ResolverKind::Static);
        assert_eq!(config.stores.tokens, default_tokens());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 3000

[database]
url = "sqlite://data/addresses.db"
max_connections = 8
bootstrap_schema = false

[stores]
resolver = "static"

[[stores.tokens]]
token = "store-42"
beta = true

[[stores.tokens]]
token = "store-43"

[logging]
level = "debug"
json = true
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.database.max_connections, 8);
        assert!(!config.database.bootstrap_schema);
        assert_eq!(config.stores.tokens.len(), 2);
        assert!(config.stores.tokens[0].beta);
        assert!(!config.stores.tokens[1].beta);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CHECKOUT_TEST_DATABASE_URL", "sqlite://from-env.db");

        let toml_content = r#"
[database]
url = "${CHECKOUT_TEST_DATABASE_URL}"
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.database.url, "sqlite://from-env.db");

        std::env::remove_var("CHECKOUT_TEST_DATABASE_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = ServiceConfig::from_toml_str("[database]\nurl = \"mysql://localhost/db\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let duplicate_tokens = ServiceConfig::from_toml_str(
            "[[stores.tokens]]\ntoken = \"a\"\n[[stores.tokens]]\ntoken = \"a\"\nbeta = true\n",
        )
        .unwrap();
        assert!(duplicate_tokens.validate().is_err());

        let bad_level = ServiceConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());

        let database_resolver = ServiceConfig::from_toml_str(
            "[stores]\nresolver = \"database\"\ntokens = []\n",
        )
        .unwrap();
        assert!(database_resolver.validate().is_ok());
    }

    #[test]
    fn test_unknown_resolver_is_a_parse_error() {
        let result = ServiceConfig::from_toml_str("[stores]\nresolver = \"ldap\"\n");
        assert!(matches!(
            result,
            Err(CheckoutError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nport = 9090\n")
            .unwrap();

        let config = ServiceConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
