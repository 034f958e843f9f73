//! # 编码模块
//!
//! ## 设计思路
//!
//! 输出格式是封闭集合（PNG / JPEG / GIF），用枚举表达，每个变体对应一个编码函数。
//! 字符串只在边界处（URL 后缀、配置文件）解析为 [`OutputFormat`]，
//! 无法识别的格式直接报错，不静默回退。

use std::fmt;
use std::str::FromStr;

use image::buffer::ConvertBuffer;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use serde::{Deserialize, Serialize};

use super::{Canvas, RenderError};

/// JPEG 固定质量。
pub const JPEG_QUALITY: u8 = 90;

/// 输出图片格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
}

impl OutputFormat {
    /// HTTP `Content-Type`。
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        match format.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            other => Err(RenderError::UnsupportedFormat(format!(
                "{}（可选：png / jpeg / gif）",
                other
            ))),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = RenderError;

    fn try_from(format: String) -> Result<Self, Self::Error> {
        format.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 将画布编码为指定格式的字节流。
pub fn encode(canvas: &Canvas, format: OutputFormat) -> Result<Vec<u8>, RenderError> {
    match format {
        OutputFormat::Png => encode_png(canvas),
        OutputFormat::Jpeg => encode_jpeg(canvas),
        OutputFormat::Gif => encode_gif(canvas),
    }
}

fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    let image = canvas.as_rgba();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// JPEG 不支持 alpha 通道，先转换为 RGB。
fn encode_jpeg(canvas: &Canvas) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    let rgb: RgbImage = canvas.as_rgba().convert();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}

fn encode_gif(canvas: &Canvas) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    let image = canvas.as_rgba();
    {
        // 编码器 drop 时才写入文件尾
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder.encode(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )?;
    }
    Ok(bytes)
}
