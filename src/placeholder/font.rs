//! # 字体模块
//!
//! ## 设计思路
//!
//! - `FontFace`：对 `ab_glyph::FontVec` 的只读封装，实现 [`GlyphRenderer`]。
//! - `FontSlot`：进程级懒加载槽位，基于 `once_cell::sync::OnceCell`，
//!   并发首次访问时也只会加载一次；加载失败的结果同样被缓存，后续不再重试。
//!
//! 字号按 72 DPI 解释（1pt = 1px 的 em 高度），与 `ab_glyph` 的
//! `PxScale`（ascent - descent 高度）之间按 `height_unscaled / units_per_em` 换算。

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::Rgb;
use once_cell::sync::OnceCell;

use super::{Canvas, GlyphRenderer, RenderError};

/// 已解析的字体。
pub struct FontFace {
    font: FontVec,
    source: String,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace").field("source", &self.source).finish()
    }
}

impl FontFace {
    /// 从字体文件加载。
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            RenderError::FontLoad(format!("读取字体文件失败：{}（{}）", path.display(), e))
        })?;

        let mut face = Self::from_bytes(bytes)?;
        face.source = path.display().to_string();
        Ok(face)
    }

    /// 从内存中的 TrueType/OpenType 数据加载。
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, RenderError> {
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| RenderError::FontLoad(format!("字体解析失败：{}", e)))?;

        Ok(Self {
            font,
            source: "<memory>".to_string(),
        })
    }

    /// 字体来源描述（文件路径或 `<memory>`）。
    pub fn source(&self) -> &str {
        &self.source
    }

    fn px_scale(&self, font_size: u32) -> PxScale {
        let units_per_em = self.font.units_per_em().unwrap_or(1000.0);
        PxScale::from(font_size as f32 * self.font.height_unscaled() / units_per_em)
    }
}

impl GlyphRenderer for FontFace {
    fn draw_text(
        &self,
        canvas: &mut Canvas,
        text: &str,
        font_size: u32,
        origin: (i64, i64),
        color: Rgb<u8>,
    ) -> Result<(), RenderError> {
        if font_size == 0 || text.is_empty() {
            return Ok(());
        }

        let scale = self.px_scale(font_size);
        let scaled = self.font.as_scaled(scale);

        let mut caret = point(origin.0 as f32, origin.1 as f32);
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }

            let glyph = id.with_scale_and_position(scale, caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };

            let bounds = outlined.px_bounds();
            let (min_x, min_y) = (bounds.min.x as i64, bounds.min.y as i64);
            outlined.draw(|gx, gy, coverage| {
                canvas.blend_pixel(min_x + i64::from(gx), min_y + i64::from(gy), color, coverage);
            });
        }

        Ok(())
    }
}

type FontLoader = Box<dyn Fn() -> Result<FontFace, RenderError> + Send + Sync>;

/// 懒加载字体槽位：最多加载一次，结果（含失败）永久缓存。
pub struct FontSlot {
    cell: OnceCell<Result<Arc<FontFace>, String>>,
    loader: FontLoader,
}

impl FontSlot {
    /// 从文件路径懒加载。
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::with_loader(move || FontFace::from_path(&path))
    }

    /// 使用自定义加载函数。
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Result<FontFace, RenderError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    /// 获取字体，首次调用时加载。
    pub fn get_or_load(&self) -> Result<Arc<FontFace>, RenderError> {
        self.cell
            .get_or_init(|| match (self.loader)() {
                Ok(face) => {
                    log::info!("🔤 字体加载完成：{}", face.source());
                    Ok(Arc::new(face))
                }
                Err(err) => {
                    log::error!("字体加载失败，后续请求将持续失败：{err}");
                    Err(err.to_string())
                }
            })
            .clone()
            .map_err(RenderError::FontLoad)
    }

    /// 是否已经尝试过加载（无论成功与否）。
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
