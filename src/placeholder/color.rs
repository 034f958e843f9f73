//! # 颜色规范化模块
//!
//! ## 设计思路
//!
//! URL 里的颜色参数是 1~6 位十六进制简写，这里统一展开为 6 位形式：
//!
//! | 输入 | 输出 |
//! |------|------|
//! | `F` | `FFFFFF` |
//! | `FA` | `FAFAFA` |
//! | `F0A` | `FF00AA` |
//! | `123456` | `123456` |
//!
//! 4 位和 5 位输入原样透传，转换为 RGB 时缺失的通道按 0 处理。
//!
//! 文字颜色未指定时，根据背景的感知亮度在黑白之间选择。

use std::fmt;

use image::Rgb;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::RenderError;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]{1,6}$").expect("hex color pattern"));

/// 感知亮度阈值，高于该值时使用黑色文字。
pub const BRIGHTNESS_THRESHOLD: u32 = 130;

/// 十六进制颜色字符串（不带 `#`）。
///
/// 通过 [`normalize_color`] 得到的值保证为合法十六进制；
/// 直接从配置构造的值在 `AppSettings::validate` 中校验。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn black() -> Self {
        Self::new("000000")
    }

    pub fn white() -> Self {
        Self::new("FFFFFF")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 按 `[0..2]`、`[2..4]`、`[4..]` 切分通道，缺失或非法的通道取 0。
    pub fn to_rgb(&self) -> Rgb<u8> {
        let channel = |slice: Option<&str>| {
            slice
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };

        Rgb([
            channel(self.0.get(0..2)),
            channel(self.0.get(2..4)),
            channel(self.0.get(4..)),
        ])
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 将颜色参数规范化为 6 位十六进制。
///
/// - 空字符串：直接返回 `default`（不再校验）
/// - 非法字符串：返回 `ColorFormat` 错误，错误中携带 `default` 作为回退值
///
/// # 示例
/// ```rust
/// use gummy_image::placeholder::{normalize_color, HexColor};
///
/// let default = HexColor::new("FAFAFA");
/// assert_eq!(normalize_color("F0A", &default)?.as_str(), "FF00AA");
/// # Ok::<(), gummy_image::placeholder::RenderError>(())
/// ```
pub fn normalize_color(token: &str, default: &HexColor) -> Result<HexColor, RenderError> {
    if token.is_empty() {
        return Ok(default.clone());
    }

    if !HEX_COLOR.is_match(token) {
        return Err(RenderError::ColorFormat {
            token: token.to_string(),
            fallback: default.clone(),
        });
    }

    let expanded = match token.len() {
        1 => token.repeat(6),
        2 => token.repeat(3),
        3 => token.chars().flat_map(|c| [c, c]).collect(),
        _ => token.to_string(),
    };

    Ok(HexColor(expanded))
}

/// 感知亮度：`sqrt(0.241·R² + 0.691·G² + 0.068·B²)`，截断为整数。
pub fn perceived_brightness(color: Rgb<u8>) -> u32 {
    let [r, g, b] = color.0.map(f64::from);
    (r * r * 0.241 + g * g * 0.691 + b * b * 0.068).sqrt() as u32
}

/// 给定亮度下可读的文字颜色。
pub fn text_color_for_brightness(brightness: u32) -> HexColor {
    if brightness > BRIGHTNESS_THRESHOLD {
        HexColor::black()
    } else {
        HexColor::white()
    }
}

/// 根据背景色选择黑色或白色文字。
pub fn readable_text_color(background: Rgb<u8>) -> HexColor {
    text_color_for_brightness(perceived_brightness(background))
}
