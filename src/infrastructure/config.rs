//! 配置加载
//!
//! 启动时从环境变量读取一次。空字符串视为未设置，全部字段都有固定默认值。

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Serialize, Serializer};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_VERSION: &str = "1.0.0";

/// 部署模式，决定未处理错误是否脱敏
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
    Other(String),
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value {
            "development" => Environment::Development,
            "production" => Environment::Production,
            "test" => Environment::Test,
            other => Environment::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
            Environment::Other(name) => name,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("无效的端口 PORT={0}")]
    InvalidPort(String),
    #[error("无效的监听地址 HOST={0}")]
    InvalidHost(String),
}

/// 服务配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub version: String,
    pub deploy_time: Option<String>,
    pub environment: Environment,
    pub hostname: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            version: DEFAULT_VERSION.to_string(),
            deploy_time: None,
            environment: Environment::default(),
            hostname: None,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// 从进程环境变量加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值查找函数加载
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let host = match get("HOST") {
            Some(raw) => raw.parse::<IpAddr>().map_err(|_| ConfigError::InvalidHost(raw))?,
            None => defaults.host,
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        Ok(Self {
            host,
            port,
            version: get("APP_VERSION").unwrap_or(defaults.version),
            deploy_time: get("DEPLOY_TIME"),
            environment: get("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or_default(),
            hostname: get("HOSTNAME"),
            log_dir: get("LOG_DIR").map(PathBuf::from),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn deploy_time_or_na(&self) -> &str {
        self.deploy_time.as_deref().unwrap_or("N/A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.deploy_time_or_na(), "N/A");
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("APP_VERSION", "2.3.4"),
            ("APP_ENV", "production"),
            ("DEPLOY_TIME", "2025-06-01T12:00:00Z"),
            ("HOSTNAME", "task-abc"),
            ("HOST", "127.0.0.1"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.version, "2.3.4");
        assert!(config.environment.is_production());
        assert_eq!(config.deploy_time_or_na(), "2025-06-01T12:00:00Z");
        assert_eq!(config.hostname.as_deref(), Some("task-abc"));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = load(&[("PORT", ""), ("APP_VERSION", ""), ("APP_ENV", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(
            load(&[("PORT", "abc")]),
            Err(ConfigError::InvalidPort(p)) if p == "abc"
        ));
        assert!(load(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn test_unknown_environment_is_not_production() {
        let config = load(&[("APP_ENV", "staging")]).unwrap();
        assert_eq!(config.environment.as_str(), "staging");
        assert!(!config.environment.is_production());
    }
}
