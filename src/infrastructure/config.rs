//! 配置加载
//!
//! 依次查找 `catalog.toml`、`./config/catalog.toml`，找不到时使用默认配置。
//! 环境变量 `CATALOG_API_BASE_URL` 覆盖 `api.base_url`。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use tracing::info;

use crate::app::display::{DefaultImage, Tooltip, DEFAULT_IMAGE_URL};

pub const BASE_URL_ENV: &str = "CATALOG_API_BASE_URL";

/// 产品目录配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub display: DisplayConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// 后端接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// 产品资源地址
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 列表页配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub items_per_page: usize,
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_image: String,
    pub tooltip_offset_px: f64,
}

impl DisplayConfig {
    pub fn image_fallback(&self) -> DefaultImage {
        DefaultImage::new(self.default_image.clone())
    }

    pub fn tooltip(&self, text: impl Into<String>) -> Tooltip {
        Tooltip::new(text).with_offset(self.tooltip_offset_px)
    }
}

/// 内存后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub base_path: String,
    /// 启动时是否写入示例数据
    pub seed_samples: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3002/bp/products".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            items_per_page: 5,
            page_size_options: vec![5, 10, 20],
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_image: DEFAULT_IMAGE_URL.to_string(),
            tooltip_offset_px: 30.0,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3002,
            base_path: "/bp/products".to_string(),
            seed_samples: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))
    }

    /// 用环境变量覆盖配置
    pub fn apply_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.api.base_url = base_url;
            }
        }
        self
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("API 地址不能为空".to_string()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "API 地址必须以 http:// 或 https:// 开头: {}",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }

        if self.list.items_per_page == 0 {
            return Err(ConfigError::Validation("每页数量必须大于0".to_string()));
        }
        if self.list.page_size_options.iter().any(|size| *size == 0) {
            return Err(ConfigError::Validation("分页选项必须大于0".to_string()));
        }

        if self.display.default_image.is_empty() {
            return Err(ConfigError::Validation("默认图片不能为空".to_string()));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Validation("服务端口必须大于0".to_string()));
        }
        if self.server.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 加载并验证配置：显式路径优先，否则查找默认位置
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match explicit {
        Some(path) => {
            info!(path = %path.display(), "从配置文件加载");
            Config::load_from_file(path)?
        }
        None => {
            let found = ["catalog.toml", "./config/catalog.toml"]
                .iter()
                .map(Path::new)
                .find(|path| path.exists());

            match found {
                Some(path) => {
                    info!(path = %path.display(), "从配置文件加载");
                    Config::load_from_file(path)?
                }
                None => {
                    info!("未找到配置文件，使用默认配置");
                    Config::default()
                }
            }
        }
    }
    .apply_env();

    config.validate()?;
    Ok(config)
}
