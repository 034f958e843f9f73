//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有"可调策略"集中到 `PlaceholderConfig`：默认格式、默认背景色、
//! 尺寸上限、尺寸预设与字体路径。配置在启动时加载一次，之后只读共享。
//!
//! ## 实现思路
//!
//! - `Default` 提供可直接使用的配置（含常用广告位尺寸预设）。
//! - 字段全部带 `serde(default)`，配置文件只需写需要覆盖的项。
//! - `validate` 在启动时校验默认颜色与尺寸上限，避免请求期才暴露配置错误。

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{HexColor, OutputFormat, RenderError, normalize_color};

/// 占位图生成配置。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// 字体文件路径。
    pub font_path: PathBuf,
    /// 未指定后缀时的输出格式。
    pub default_format: OutputFormat,
    /// 未指定背景色时使用的颜色。
    pub default_bgcolor: HexColor,
    /// 宽度上限（像素）。
    pub max_width: u32,
    /// 高度上限（像素）。
    pub max_height: u32,
    /// 尺寸预设：名称 -> 尺寸写法。
    pub sizes: HashMap<String, String>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("fonts/DroidSans.ttf"),
            default_format: OutputFormat::Png,
            default_bgcolor: HexColor::new("FAFAFA"),
            max_width: 5000,
            max_height: 5000,
            sizes: default_size_presets(),
        }
    }
}

/// 内置的常用尺寸预设（IAB 广告位与常见分辨率）。
pub fn default_size_presets() -> HashMap<String, String> {
    [
        ("mediumrectangle", "300x250"),
        ("squarepopup", "250x250"),
        ("verticalrectangle", "240x400"),
        ("largerectangle", "336x280"),
        ("rectangle", "180x150"),
        ("popunder", "720x300"),
        ("fullbanner", "468x60"),
        ("halfbanner", "234x60"),
        ("microbar", "88x31"),
        ("button1", "120x90"),
        ("button2", "120x60"),
        ("verticalbanner", "120x240"),
        ("squarebutton", "125x125"),
        ("leaderboard", "728x90"),
        ("wideskyscraper", "160x600"),
        ("skyscraper", "120x600"),
        ("halfpage", "300x600"),
        ("vga", "640x480"),
        ("svga", "800x600"),
        ("xga", "1024x768"),
        ("hd720", "1280x720"),
        ("hd1080", "1920x1080"),
    ]
    .into_iter()
    .map(|(name, size)| (name.to_string(), size.to_string()))
    .collect()
}

impl PlaceholderConfig {
    /// 校验配置，并将默认背景色规范化为 6 位形式。
    pub fn validate(&mut self) -> Result<(), RenderError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(RenderError::SizeFormat(format!(
                "尺寸上限必须大于 0：{}x{}",
                self.max_width, self.max_height
            )));
        }

        let raw = self.default_bgcolor.as_str().to_string();
        if raw.is_empty() {
            return Err(RenderError::ColorFormat {
                token: raw,
                fallback: HexColor::new("FAFAFA"),
            });
        }
        self.default_bgcolor = normalize_color(&raw, &self.default_bgcolor)?;

        Ok(())
    }
}
