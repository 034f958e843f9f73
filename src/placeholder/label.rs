//! # 文字布局模块
//!
//! ## 设计思路
//!
//! 文字位置不做真实的字形测量，而是使用固定的经验公式近似居中：
//!
//! ```text
//! extent      = min(width, height)
//! text_budget = extent - extent / 10 * 2
//! font_size   = text_budget / len(label) * 2
//! x           = width / 2 - text_budget / 2 - font_size / 8
//! y           = height / 2 + text_budget / 10 + font_size / 16   (基线)
//! ```
//!
//! 全部为整数运算，结果只是"看起来差不多居中"，这里保持公式不变以兼容已有输出。
//!
//! 字形光栅化通过 [`GlyphRenderer`] 注入，便于共享只读字体与测试替换。

use image::Rgb;

use super::color::readable_text_color;
use super::{Canvas, Dimensions, HexColor, RenderError};

/// 字形光栅化能力。
///
/// 实现方需可被多个请求线程同时只读访问。
pub trait GlyphRenderer: Send + Sync {
    /// 以 `origin` 为基线起点、`font_size` 为字号（1pt = 1px）绘制 `text`。
    fn draw_text(
        &self,
        canvas: &mut Canvas,
        text: &str,
        font_size: u32,
        origin: (i64, i64),
        color: Rgb<u8>,
    ) -> Result<(), RenderError>;
}

/// 一次文字绘制的完整布局结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLayout {
    pub text: String,
    pub color: HexColor,
    pub font_size: i64,
    pub x: i64,
    pub y: i64,
}

/// 计算文字内容、颜色、字号与位置，不修改画布。
pub fn layout_label(
    dimensions: Dimensions,
    background: Rgb<u8>,
    label: Option<&str>,
    foreground: Option<&HexColor>,
) -> LabelLayout {
    let text = match label {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => dimensions.to_string(),
    };

    let color = match foreground {
        Some(color) => color.clone(),
        None => readable_text_color(background),
    };

    let width = i64::from(dimensions.width);
    let height = i64::from(dimensions.height);

    let extent = width.min(height);
    let text_budget = extent - extent / 10 * 2;
    // 非空保证：空文字已回退为尺寸字符串
    let font_size = text_budget / text.len() as i64 * 2;

    let x = width / 2 - text_budget / 2 - font_size / 8;
    let y = height / 2 + text_budget / 10 + font_size / 16;

    LabelLayout {
        text,
        color,
        font_size,
        x,
        y,
    }
}

/// 在画布上绘制文字，返回实际使用的布局。
pub fn apply_label(
    canvas: &mut Canvas,
    label: Option<&str>,
    foreground: Option<&HexColor>,
    renderer: &dyn GlyphRenderer,
) -> Result<LabelLayout, RenderError> {
    let layout = layout_label(canvas.dimensions(), canvas.background(), label, foreground);

    log::debug!(
        "文字布局：text={:?} color={} font_size={} origin=({}, {})",
        layout.text,
        layout.color,
        layout.font_size,
        layout.x,
        layout.y
    );

    if layout.font_size <= 0 {
        return Ok(layout);
    }

    let font_size = u32::try_from(layout.font_size)
        .map_err(|_| RenderError::FontLoad(format!("字号超出范围：{}", layout.font_size)))?;

    renderer.draw_text(
        canvas,
        &layout.text,
        font_size,
        (layout.x, layout.y),
        layout.color.to_rgb(),
    )?;

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(String, u32, (i64, i64), Rgb<u8>)>>,
    }

    impl GlyphRenderer for RecordingRenderer {
        fn draw_text(
            &self,
            _canvas: &mut Canvas,
            text: &str,
            font_size: u32,
            origin: (i64, i64),
            color: Rgb<u8>,
        ) -> Result<(), RenderError> {
            self.calls
                .lock()
                .expect("calls lock")
                .push((text.to_string(), font_size, origin, color));
            Ok(())
        }
    }

    #[test]
    fn default_label_uses_dimensions() {
        let layout = layout_label(Dimensions::new(300, 200), Rgb([0xFA, 0xFA, 0xFA]), None, None);

        assert_eq!(layout.text, "300x200");
        assert_eq!(layout.color, HexColor::black());
        // extent=200 budget=160 font=160/7*2=44
        assert_eq!(layout.font_size, 44);
        assert_eq!(layout.x, 150 - 80 - 5);
        assert_eq!(layout.y, 100 + 16 + 2);
    }

    #[test]
    fn empty_label_falls_back_to_dimensions() {
        let layout = layout_label(Dimensions::new(50, 80), Rgb([0, 0, 0]), Some(""), None);
        assert_eq!(layout.text, "50x80");
        assert_eq!(layout.color, HexColor::white());
    }

    #[test]
    fn custom_label_and_explicit_color() {
        let red = HexColor::new("FF0000");
        let layout = layout_label(Dimensions::new(400, 100), Rgb([0, 0, 0]), Some("Hi"), Some(&red));

        // extent=100 budget=80 font=80/2*2=80
        assert_eq!(layout.text, "Hi");
        assert_eq!(layout.color, red);
        assert_eq!(layout.font_size, 80);
        assert_eq!(layout.x, 200 - 40 - 10);
        assert_eq!(layout.y, 50 + 8 + 5);
    }

    #[test]
    fn tiny_canvas_yields_zero_font_size() {
        let layout = layout_label(Dimensions::new(1, 1), Rgb([0, 0, 0]), None, None);
        assert_eq!(layout.font_size, 0);
        assert_eq!(layout.x, 0);
        assert_eq!(layout.y, 0);

        let layout = layout_label(Dimensions::new(10, 10), Rgb([0, 0, 0]), Some("wide label"), None);
        assert_eq!(layout.font_size, 0);
    }

    #[test]
    fn apply_label_passes_layout_to_renderer() {
        let renderer = RecordingRenderer::default();
        let mut canvas = Canvas::new(Dimensions::new(300, 200), Rgb([0xFA, 0xFA, 0xFA]));

        let layout = apply_label(&mut canvas, None, None, &renderer).expect("apply label");

        let calls = renderer.calls.lock().expect("calls lock");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "300x200");
        assert_eq!(calls[0].1, 44);
        assert_eq!(calls[0].2, (layout.x, layout.y));
        assert_eq!(calls[0].3, Rgb([0, 0, 0]));
    }

    #[test]
    fn apply_label_skips_zero_font_size() {
        let renderer = RecordingRenderer::default();
        let mut canvas = Canvas::new(Dimensions::new(2, 2), Rgb([0, 0, 0]));

        apply_label(&mut canvas, None, None, &renderer).expect("apply label");
        assert!(renderer.calls.lock().expect("calls lock").is_empty());
    }
}
