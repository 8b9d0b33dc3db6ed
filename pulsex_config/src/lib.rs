//! 配置管理系统
//!
//! 提供发射器运行时的配置管理，支持 TOML 文件和环境变量。

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析配置文件失败: {0}")]
    Parse(String),

    /// 验证错误
    #[error("配置验证失败: {0}")]
    Validation(String),

    /// 环境变量错误
    #[error("环境变量解析失败: {0}")]
    EnvVar(String),
}

/// 配置 Result 类型
pub type Result<T> = std::result::Result<T, ConfigError>;

/// 发射器运行时配置
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// 默认轮询间隔（毫秒）
    #[serde(default = "default_interval_ms")]
    pub default_interval_ms: u64,

    /// 数据事件广播通道容量
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_interval_ms: default_interval_ms(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl RuntimeConfig {
    /// 从 TOML 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("读取配置文件失败: {}", e)))?;

        let config: RuntimeConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("解析配置文件失败: {}", e)))?;

        Ok(config)
    }

    /// 从环境变量加载配置并覆盖
    ///
    /// 支持的环境变量：
    /// - PULSEX_DEFAULT_INTERVAL_MS: 默认轮询间隔（毫秒）
    /// - PULSEX_EVENT_CAPACITY: 事件通道容量
    pub fn load_with_env_override(mut self) -> Result<Self> {
        // 轮询间隔
        if let Ok(interval) = std::env::var("PULSEX_DEFAULT_INTERVAL_MS") {
            self.default_interval_ms = interval.parse()
                .map_err(|_| ConfigError::EnvVar("PULSEX_DEFAULT_INTERVAL_MS 必须是有效的 u64 数字".to_string()))?;
        }

        // 事件通道容量
        if let Ok(capacity) = std::env::var("PULSEX_EVENT_CAPACITY") {
            self.event_capacity = capacity.parse()
                .map_err(|_| ConfigError::EnvVar("PULSEX_EVENT_CAPACITY 必须是有效的 usize 数字".to_string()))?;
        }

        Ok(self)
    }

    /// 从文件加载并应用环境变量覆盖
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file(path)?.load_with_env_override()
    }

    /// 验证配置是否有效
    pub fn validate(&self) -> Result<()> {
        // 轮询间隔验证
        if self.default_interval_ms == 0 {
            return Err(ConfigError::Validation("默认轮询间隔不能为 0".to_string()));
        }
        if self.default_interval_ms > 86_400_000 {
            return Err(ConfigError::Validation("默认轮询间隔过大 (建议 <= 24 小时)".to_string()));
        }

        // 通道容量验证
        if self.event_capacity == 0 {
            return Err(ConfigError::Validation("事件通道容量不能为 0".to_string()));
        }

        Ok(())
    }

    /// 获取配置摘要信息
    pub fn summary(&self) -> String {
        format!(
            "PulseX 运行时配置:\n  默认轮询间隔: {} ms\n  事件通道容量: {}",
            self.default_interval_ms, self.event_capacity
        )
    }
}

// 默认值函数
fn default_interval_ms() -> u64 {
    1000
}

fn default_event_capacity() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.default_interval_ms, 1000);
        assert_eq!(config.event_capacity, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_interval() {
        let config = RuntimeConfig {
            default_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_huge_interval() {
        let config = RuntimeConfig {
            default_interval_ms: 86_400_001,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = RuntimeConfig {
            event_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let config: RuntimeConfig = toml::from_str(
            r#"
            default_interval_ms = 250
            event_capacity = 16
            "#,
        )
        .unwrap();
        assert_eq!(config.default_interval_ms, 250);
        assert_eq!(config.event_capacity, 16);
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let config: RuntimeConfig = toml::from_str("").unwrap();
        assert_eq!(config.default_interval_ms, 1000);
        assert_eq!(config.event_capacity, 100);
    }

    #[test]
    #[serial_test::serial]
    fn test_env_override_interval() {
        unsafe { std::env::set_var("PULSEX_DEFAULT_INTERVAL_MS", "2500") };
        let config = RuntimeConfig::default()
            .load_with_env_override()
            .unwrap();
        assert_eq!(config.default_interval_ms, 2500);
        unsafe { std::env::remove_var("PULSEX_DEFAULT_INTERVAL_MS") };
    }

    #[test]
    #[serial_test::serial]
    fn test_env_override_capacity() {
        unsafe { std::env::set_var("PULSEX_EVENT_CAPACITY", "64") };
        let config = RuntimeConfig::default()
            .load_with_env_override()
            .unwrap();
        assert_eq!(config.event_capacity, 64);
        unsafe { std::env::remove_var("PULSEX_EVENT_CAPACITY") };
    }

    #[test]
    #[serial_test::serial]
    fn test_env_override_invalid_interval() {
        unsafe { std::env::set_var("PULSEX_DEFAULT_INTERVAL_MS", "invalid") };
        let result = RuntimeConfig::default().load_with_env_override();
        assert!(result.is_err());
        unsafe { std::env::remove_var("PULSEX_DEFAULT_INTERVAL_MS") };
    }

    #[test]
    fn test_config_summary() {
        let config = RuntimeConfig::default();
        let summary = config.summary();
        assert!(summary.contains("1000 ms"));
        assert!(summary.contains("PulseX 运行时配置"));
    }
}
