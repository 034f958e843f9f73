//! # 请求解析与渲染编排
//!
//! ## 设计思路
//!
//! 处理链路固定为：
//! 1. 从 `size` → `bgcolor` → `fgcolor` 依次提取格式后缀（后出现的覆盖先出现的）
//! 2. 解析尺寸
//! 3. 规范化背景色（必有，缺省取配置）与文字色（仅显式指定时）
//! 4. 校验尺寸上限
//! 5. 创建画布 → 绘制文字 → 编码
//!
//! 1~4 在 [`resolve`] 中完成，不分配任何像素缓冲；
//! 只有拿到 `RenderPlan` 之后 [`render`] 才会创建画布。

use once_cell::sync::Lazy;
use regex::Regex;

use super::{
    Canvas, GlyphRenderer, OutputFormat, PlaceholderConfig, RenderError, RenderPlan,
    RenderRequest, RenderedImage, apply_label, encode, normalize_color, parse_size,
};

static FORMAT_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(jpg|jpeg|JPG|JPEG|gif|GIF|png|PNG)").expect("format suffix pattern")
});

/// 去掉格式后缀后的三个参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedTokens {
    pub size: String,
    pub bgcolor: String,
    pub fgcolor: String,
    /// 最后一个带后缀的参数给出的格式。
    pub format: Option<OutputFormat>,
}

/// 按 `size`、`bgcolor`、`fgcolor` 顺序提取格式后缀。
///
/// 每个参数中的所有后缀都会被去掉；多个参数都带后缀时，顺序靠后的参数生效。
pub fn extract_format(size: &str, bgcolor: &str, fgcolor: &str) -> StrippedTokens {
    let mut format = None;

    let mut strip = |token: &str| -> String {
        if let Some(caps) = FORMAT_SUFFIX.captures(token) {
            // 正则只匹配受支持的格式
            if let Ok(found) = caps[1].parse::<OutputFormat>() {
                format = Some(found);
            }
            FORMAT_SUFFIX.replace_all(token, "").into_owned()
        } else {
            token.to_string()
        }
    };

    let size = strip(size);
    let bgcolor = strip(bgcolor);
    let fgcolor = strip(fgcolor);

    StrippedTokens {
        size,
        bgcolor,
        fgcolor,
        format,
    }
}

/// 解析并校验请求，得到渲染计划。
///
/// 任何一步失败都会直接返回，不会创建画布。
pub fn resolve(
    request: &RenderRequest,
    config: &PlaceholderConfig,
) -> Result<RenderPlan, RenderError> {
    let tokens = extract_format(&request.size, &request.bgcolor, &request.fgcolor);
    let format = tokens.format.unwrap_or(config.default_format);

    let dimensions = parse_size(&tokens.size, &config.sizes)?;
    let background = normalize_color(&tokens.bgcolor, &config.default_bgcolor)?;
    let foreground = if tokens.fgcolor.is_empty() {
        None
    } else {
        Some(normalize_color(&tokens.fgcolor, &config.default_bgcolor)?)
    };

    if dimensions.width > config.max_width || dimensions.height > config.max_height {
        return Err(RenderError::CapacityExceeded {
            width: dimensions.width,
            height: dimensions.height,
            max_width: config.max_width,
            max_height: config.max_height,
        });
    }

    let label = request.text.clone().filter(|text| !text.is_empty());

    log::debug!(
        "请求解析完成：size={} bg={} fg={:?} label={:?} format={}",
        dimensions,
        background,
        foreground.as_ref().map(|c| c.as_str()),
        label,
        format
    );

    Ok(RenderPlan {
        dimensions,
        background,
        foreground,
        label,
        format,
    })
}

/// 执行渲染计划：创建画布、绘制文字、编码。
pub fn render(plan: RenderPlan, renderer: &dyn GlyphRenderer) -> Result<RenderedImage, RenderError> {
    let mut canvas = Canvas::new(plan.dimensions, plan.background.to_rgb());
    apply_label(
        &mut canvas,
        plan.label.as_deref(),
        plan.foreground.as_ref(),
        renderer,
    )?;

    let bytes = encode(&canvas, plan.format)?;
    Ok(RenderedImage {
        format: plan.format,
        bytes,
    })
}
