//! # 占位图生成模块（placeholder）
//!
//! ## 设计思路
//!
//! 该模块将"参数解析 → 画布填充 → 文字布局 → 编码输出"按职责拆分为多个子模块，
//! 不依赖 HTTP 层，可直接在测试或其他入口中复用。
//!
//! - `size`：尺寸写法解析（预设 / 比例 / 正方形）
//! - `color`：颜色简写规范化与感知亮度
//! - `canvas`：请求级 RGBA 画布
//! - `label`：文字布局公式与 `GlyphRenderer` 抽象
//! - `font`：基于 `ab_glyph` 的字体实现与懒加载槽位
//! - `encoder`：PNG / JPEG / GIF 编码
//! - `resolver`：格式后缀提取、参数校验与渲染编排
//! - `service`：可注入的服务状态
//! - `config/error/request`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! server.rs（URL → RenderRequest）
//!    ↓
//! service.rs（共享配置与字体）
//!    ↓
//! resolver.rs
//!    ├─ extract_format（后缀提取）
//!    ├─ size.rs / color.rs（解析 + 上限校验）→ RenderPlan
//!    ├─ canvas.rs（填充背景）
//!    ├─ label.rs → font.rs（文字布局 + 光栅化）
//!    └─ encoder.rs（编码）
//!    ↓
//! RenderedImage（字节 + Content-Type）
//! ```

mod canvas;
mod color;
mod config;
mod encoder;
mod error;
mod font;
mod label;
mod request;
pub mod resolver;
mod service;
mod size;

pub use canvas::Canvas;
pub use color::{
    BRIGHTNESS_THRESHOLD, HexColor, normalize_color, perceived_brightness, readable_text_color,
    text_color_for_brightness,
};
pub use config::{PlaceholderConfig, default_size_presets};
pub use encoder::{JPEG_QUALITY, OutputFormat, encode};
pub use error::RenderError;
pub use font::{FontFace, FontSlot};
pub use label::{GlyphRenderer, LabelLayout, apply_label, layout_label};
pub use request::{RenderPlan, RenderRequest, RenderedImage};
pub use resolver::{StrippedTokens, extract_format};
pub use service::PlaceholderService;
pub use size::{Dimensions, parse_size};
