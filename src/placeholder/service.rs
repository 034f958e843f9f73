//! # 服务层（可注入状态）
//!
//! ## 设计思路
//!
//! 使用 `PlaceholderService` 持有只读配置与共享字体，替代全局单例。
//! 好处：
//! 1. 生命周期清晰（由 `main.rs` 统一创建）
//! 2. 测试可注入替身渲染器，无需真实字体文件
//! 3. 多个工作线程通过 `Arc` 共享同一实例
//!
//! ## 实现思路
//!
//! `render` 执行完整链路并记录 `resolve/render/total` 阶段耗时，便于性能诊断。

use std::sync::Arc;
use std::time::Instant;

use super::{GlyphRenderer, PlaceholderConfig, RenderError, RenderRequest, RenderedImage, resolver};

/// 占位图服务。
pub struct PlaceholderService {
    config: Arc<PlaceholderConfig>,
    renderer: Arc<dyn GlyphRenderer>,
}

impl PlaceholderService {
    /// 使用配置与字形渲染器创建服务。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use gummy_image::placeholder::{FontFace, PlaceholderConfig, PlaceholderService};
    ///
    /// let config = PlaceholderConfig::default();
    /// let font = Arc::new(FontFace::from_path(&config.font_path)?);
    /// let service = PlaceholderService::new(config, font);
    /// # Ok::<(), gummy_image::placeholder::RenderError>(())
    /// ```
    pub fn new(config: PlaceholderConfig, renderer: Arc<dyn GlyphRenderer>) -> Self {
        Self {
            config: Arc::new(config),
            renderer,
        }
    }

    pub fn config(&self) -> &PlaceholderConfig {
        &self.config
    }

    /// 执行完整处理流程：解析 → 校验 → 绘制 → 编码。
    pub fn render(&self, request: &RenderRequest) -> Result<RenderedImage, RenderError> {
        let total_start = Instant::now();

        let resolve_start = Instant::now();
        let plan = resolver::resolve(request, &self.config)?;
        let resolve_elapsed = resolve_start.elapsed();

        let dimensions = plan.dimensions;
        let render_start = Instant::now();
        let image = resolver::render(plan, self.renderer.as_ref())?;
        let render_elapsed = render_start.elapsed();

        log::info!(
            "✅ 占位图生成完成 - size={} format={} bytes={} resolve={}µs render={}ms total={}ms",
            dimensions,
            image.format,
            image.bytes.len(),
            resolve_elapsed.as_micros(),
            render_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(image)
    }
}
