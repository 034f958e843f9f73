//! # 请求与中间模型
//!
//! ## 设计思路
//!
//! 将"外部输入"和"流水线中间结果"解耦：
//! - `RenderRequest` 表示路由层传入的原始参数
//! - `RenderPlan` 表示解析、校验完成后的不可变渲染计划
//! - `RenderedImage` 表示编码完成的图片字节

use super::{Dimensions, HexColor, OutputFormat};

/// 路由层传入的原始参数。
///
/// `size`、`bgcolor`、`fgcolor` 都可能带有 `.png` 之类的格式后缀。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRequest {
    pub size: String,
    pub bgcolor: String,
    pub fgcolor: String,
    pub text: Option<String>,
}

impl RenderRequest {
    pub fn new(size: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            ..Self::default()
        }
    }

    pub fn with_bgcolor(mut self, bgcolor: impl Into<String>) -> Self {
        self.bgcolor = bgcolor.into();
        self
    }

    pub fn with_fgcolor(mut self, fgcolor: impl Into<String>) -> Self {
        self.fgcolor = fgcolor.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// 解析完成的渲染计划，只被消费一次。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub dimensions: Dimensions,
    pub background: HexColor,
    /// `None` 表示按背景亮度自动选择。
    pub foreground: Option<HexColor>,
    /// `None` 表示使用尺寸字符串。
    pub label: Option<String>,
    pub format: OutputFormat,
}

/// 编码阶段输出。
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl RenderedImage {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}
