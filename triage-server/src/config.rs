//! 服务配置
//!
//! 加载顺序：内置默认值 → 配置文件 → `TRIAGE__` 前缀环境变量，命令行参数最后覆盖。

use anyhow::{bail, Context, Result};
use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};
use triage_integration::FacilityLookupConfig;

/// 服务完整配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub facilities: FacilitiesConfig,
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听主机
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 静态页面目录
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "static".to_string(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 连接字符串
    pub url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 历史记录单次返回上限
    pub history_limit: i64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://database/health_records.db".to_string(),
            max_connections: 5,
            history_limit: 10,
        }
    }
}

/// 附近机构查询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilitiesConfig {
    /// 关闭时使用内置的示例机构
    pub enabled: bool,
    pub endpoint: String,
    pub radius_m: u32,
    pub max_results: usize,
    pub timeout_secs: u64,
}

impl Default for FacilitiesConfig {
    fn default() -> Self {
        let lookup = FacilityLookupConfig::default();
        Self {
            enabled: true,
            endpoint: lookup.endpoint,
            radius_m: lookup.radius_m,
            max_results: lookup.max_results,
            timeout_secs: lookup.timeout_secs,
        }
    }
}

impl FacilitiesConfig {
    pub fn lookup(&self) -> FacilityLookupConfig {
        FacilityLookupConfig {
            endpoint: self.endpoint.clone(),
            radius_m: self.radius_m,
            max_results: self.max_results,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志过滤级别，语法同 `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 加载配置，`path` 为空时只使用默认值和环境变量
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }

        let settings = builder
            .add_source(Self::environment())
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// 环境变量配置源，如 `TRIAGE__SERVER__STATIC_DIR`
    fn environment() -> Environment {
        Environment::with_prefix("TRIAGE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    /// 以内置默认值作为最底层配置源
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Config::try_from(&AppConfig::default())
            .context("Failed to serialize default configuration")?;
        Ok(Config::builder().add_source(defaults))
    }

    /// 检查配置取值
    pub fn validate(&self) -> Result<()> {
        if self.database.history_limit <= 0 {
            bail!("database.history_limit must be greater than 0");
        }
        if self.database.max_connections == 0 {
            bail!("database.max_connections must be greater than 0");
        }
        if self.facilities.max_results == 0 {
            bail!("facilities.max_results must be greater than 0");
        }
        if self.facilities.radius_m == 0 {
            bail!("facilities.radius_m must be greater than 0");
        }
        if self.facilities.timeout_secs == 0 {
            bail!("facilities.timeout_secs must be greater than 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FileFormat, Map};

    fn from_toml(text: &str) -> AppConfig {
        AppConfig::defaults()
            .unwrap()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.history_limit, 10);
        assert!(config.facilities.enabled);
        assert_eq!(config.facilities.lookup().max_results, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 8080

            [facilities]
            enabled = false
            max_results = 3
            "#,
        );

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.facilities.enabled);
        assert_eq!(config.facilities.max_results, 3);
        assert_eq!(config.facilities.radius_m, 5000);
        assert_eq!(config.database.url, "sqlite://database/health_records.db");
    }

    #[test]
    fn test_environment_overrides_file() {
        let vars: Map<String, String> = [
            ("TRIAGE__SERVER__PORT", "8081"),
            ("TRIAGE__SERVER__STATIC_DIR", "public"),
            ("TRIAGE__FACILITIES__ENABLED", "false"),
            ("OTHER__SERVER__PORT", "9999"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config: AppConfig = AppConfig::defaults()
            .unwrap()
            .add_source(File::from_str("[server]\nport = 8080\n", FileFormat::Toml))
            .add_source(AppConfig::environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.static_dir, "public");
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.facilities.enabled);
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = AppConfig::default();
        config.facilities.max_results = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.database.history_limit = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.facilities.radius_m = 0;
        assert!(config.validate().is_err());
    }
}
