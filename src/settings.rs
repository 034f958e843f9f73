//! 应用设置加载模块
//!
//! # 设计思路
//!
//! 设置以 JSON 文件保存，字段全部可选：缺失的项使用默认值，
//! 文件不存在时整体使用默认设置，方便本地直接启动。
//!
//! 占位图相关字段（`font_path`、`max_width` 等）平铺在顶层，
//! 反序列化时直接落到 `PlaceholderConfig`。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::placeholder::PlaceholderConfig;

/// 未指定时读取的设置文件。
pub const DEFAULT_SETTINGS_PATH: &str = "gummy.json";

/// 指定设置文件路径的环境变量。
pub const SETTINGS_ENV: &str = "GUMMY_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// HTTP 监听地址。
    pub listen_addr: String,
    /// 工作线程数，0 表示按 CPU 数量。
    pub workers: usize,
    #[serde(flatten)]
    pub placeholder: PlaceholderConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:9000".to_string(),
            workers: 0,
            placeholder: PlaceholderConfig::default(),
        }
    }
}

impl AppSettings {
    /// 实际使用的工作线程数。
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

/// 从 JSON 字符串解析并校验设置。
pub fn parse_settings(content: &str) -> Result<AppSettings, AppError> {
    let mut settings = serde_json::from_str::<AppSettings>(content)
        .map_err(|e| AppError::Config(format!("解析设置文件失败: {}", e)))?;

    settings
        .placeholder
        .validate()
        .map_err(|e| AppError::Config(format!("设置校验失败: {}", e)))?;

    Ok(settings)
}

/// 从文件加载设置；文件不存在时使用默认设置。
pub fn load_settings_from_path(path: &Path) -> Result<AppSettings, AppError> {
    if !path.exists() {
        log::warn!("设置文件不存在，使用默认设置: {}", path.display());
        let mut settings = AppSettings::default();
        settings.placeholder.validate()?;
        return Ok(settings);
    }

    let content = fs::read_to_string(path)?;
    let settings = parse_settings(&content)?;
    log::info!("已加载设置文件: {}", path.display());
    Ok(settings)
}
