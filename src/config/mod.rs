/// 统一配置系统
///
/// 提供TOML配置文件、JSON字符串、环境变量覆盖和验证
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod sfx;

pub use sfx::SfxConfig;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 引擎主配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 特效配置
    #[serde(default)]
    pub sfx: SfxConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("ENGINE_SFX_POOL_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                self.sfx.pool_capacity = capacity;
            }
        }
        if let Ok(val) = env::var("ENGINE_SFX_IMPULSE_JITTER") {
            if let Ok(jitter) = val.parse() {
                self.sfx.impulse_jitter = jitter;
            }
        }
        if let Ok(val) = env::var("ENGINE_LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&val) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        self.sfx.validate()?;
        Ok(())
    }

    /// 配置文件查找路径，按优先级排列
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("sfx.toml")];
        if let Some(home) = env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(".config/game_engine/sfx.toml"));
        }
        paths
    }

    /// 加载第一个可读取的配置文件，都不可用时返回默认配置
    pub fn load_or_default() -> Self {
        Self::load_first(&Self::search_paths())
    }

    fn load_first(paths: &[PathBuf]) -> Self {
        for path in paths {
            match Self::from_toml_file(path) {
                Ok(config) => {
                    tracing::debug!(target: "config", path = %path.display(), "Loaded sfx config");
                    return config;
                }
                Err(ConfigError::FileError(_)) => {}
                Err(e) => {
                    tracing::warn!(target: "config", path = %path.display(), error = %e, "Ignoring unreadable sfx config");
                }
            }
        }
        tracing::debug!(target: "config", "Using default configuration");
        Self::default()
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,

    /// 是否输出到控制台
    pub log_to_console: bool,
}

use crate::impl_default;

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    log_to_console: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    /// 不区分大小写地解析级别名
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}
