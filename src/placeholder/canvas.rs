//! # 画布模块
//!
//! 每个请求独占一块 RGBA 画布：创建时整块填充背景色，
//! 之后只有文字绘制会修改像素，编码完成即丢弃。

use image::{Rgb, Rgba, RgbaImage};

use super::Dimensions;

/// 请求级 RGBA 画布。
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    background: Rgb<u8>,
}

impl Canvas {
    /// 分配 `width * height` 像素并全部填充为不透明的 `fill`。
    pub fn new(dimensions: Dimensions, fill: Rgb<u8>) -> Self {
        let [r, g, b] = fill.0;
        let image = RgbaImage::from_pixel(dimensions.width, dimensions.height, Rgba([r, g, b, 255]));

        Self {
            image,
            background: fill,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    /// 创建时使用的填充色。
    pub fn background(&self) -> Rgb<u8> {
        self.background
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// 以覆盖率为 alpha 将 `color` 混合到 `(x, y)`，越界坐标直接忽略。
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>, coverage: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }

        let alpha = coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let inv = 1.0 - alpha;
        for channel in 0..3 {
            let blended = f32::from(color.0[channel]) * alpha + f32::from(dst.0[channel]) * inv;
            dst.0[channel] = blended.round().clamp(0.0, 255.0) as u8;
        }
        dst.0[3] = 255;
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_pixel_with_opaque_background() {
        let canvas = Canvas::new(Dimensions::new(7, 3), Rgb([0x12, 0x34, 0x56]));

        assert_eq!(canvas.width(), 7);
        assert_eq!(canvas.height(), 3);
        assert_eq!(canvas.as_rgba().as_raw().len(), 7 * 3 * 4);
        assert!(canvas.as_rgba().pixels().all(|p| *p == Rgba([0x12, 0x34, 0x56, 255])));
    }

    #[test]
    fn blend_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(Dimensions::new(2, 2), Rgb([0, 0, 0]));
        canvas.blend_pixel(-1, 0, Rgb([255, 255, 255]), 1.0);
        canvas.blend_pixel(0, 2, Rgb([255, 255, 255]), 1.0);
        canvas.blend_pixel(2, 0, Rgb([255, 255, 255]), 1.0);

        assert!(canvas.as_rgba().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn blend_mixes_by_coverage() {
        let mut canvas = Canvas::new(Dimensions::new(2, 1), Rgb([0, 0, 0]));
        canvas.blend_pixel(0, 0, Rgb([255, 255, 255]), 1.0);
        canvas.blend_pixel(1, 0, Rgb([200, 100, 0]), 0.5);

        assert_eq!(canvas.pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(1, 0), Rgba([100, 50, 0, 255]));
    }
}
