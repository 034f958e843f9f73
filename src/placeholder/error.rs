//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载占位图链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 颜色格式错误比较特殊：规范化失败时仍然要给出一个可用的回退颜色，
//! 因此回退值直接放在错误变体里，由调用方决定是否使用。

use super::HexColor;

/// 占位图处理统一错误类型。
///
/// 该类型会在进程层被上转为 `AppError`，在 HTTP 层被映射为响应状态码。
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("尺寸格式错误：{0}")]
    SizeFormat(String),

    #[error("颜色格式错误：{token}（回退为 {fallback}）")]
    ColorFormat {
        /// 原始颜色参数。
        token: String,
        /// 配置中的默认颜色，调用方仍可用它继续渲染。
        fallback: HexColor,
    },

    #[error("资源限制：{width}x{height} 超过上限 {max_width}x{max_height}")]
    CapacityExceeded {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("不支持的输出格式：{0}")]
    UnsupportedFormat(String),

    #[error("字体错误：{0}")]
    FontLoad(String),

    #[error("编码错误：{0}")]
    Encode(String),
}

impl RenderError {
    /// 稳定错误码，用于日志检索。
    pub fn code(&self) -> &'static str {
        match self {
            Self::SizeFormat(_) => "E_SIZE_FORMAT",
            Self::ColorFormat { .. } => "E_COLOR_FORMAT",
            Self::CapacityExceeded { .. } => "E_CAPACITY",
            Self::UnsupportedFormat(_) => "E_UNSUPPORTED_FORMAT",
            Self::FontLoad(_) => "E_FONT",
            Self::Encode(_) => "E_ENCODE",
        }
    }

    /// 是否由请求参数引起（而非服务端故障）。
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::SizeFormat(_)
                | Self::ColorFormat { .. }
                | Self::CapacityExceeded { .. }
                | Self::UnsupportedFormat(_)
        )
    }
}

impl From<image::ImageError> for RenderError {
    fn from(error: image::ImageError) -> Self {
        Self::Encode(error.to_string())
    }
}
