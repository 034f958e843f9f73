//! # 尺寸解析模块
//!
//! ## 设计思路
//!
//! 支持以下几种尺寸写法：
//! - 预设名称（配置中的 `sizes`），先替换为对应写法再解析
//! - 常规尺寸：`300x200`、`300X200`
//! - 比例尺寸：`4:3x300`（高度固定）、`300x4:3`（宽度固定）
//! - 正方形：`300`
//!
//! 比例换算使用整数除法（向零截断），不做四舍五入。
//! 两边同时为比例时无法确定基准边，直接判为格式错误。

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::RenderError;

static REGULAR_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)[xX](.+)$").expect("regular size pattern"));
static ASPECT_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+):(.+)$").expect("aspect size pattern"));

/// 解析后的图片尺寸，宽高均大于 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 比例写法 `P:Q`。
#[derive(Debug, Clone, Copy)]
struct Aspect {
    numerator: u64,
    denominator: u64,
}

/// 将尺寸参数解析为宽高。
///
/// # 示例
/// ```rust
/// use std::collections::HashMap;
/// use gummy_image::placeholder::{parse_size, Dimensions};
///
/// let presets = HashMap::new();
/// assert_eq!(parse_size("4:3x300", &presets)?, Dimensions::new(400, 300));
/// # Ok::<(), gummy_image::placeholder::RenderError>(())
/// ```
pub fn parse_size(
    token: &str,
    presets: &HashMap<String, String>,
) -> Result<Dimensions, RenderError> {
    let size = match presets.get(token) {
        Some(replacement) => {
            log::debug!("尺寸预设 {} -> {}", token, replacement);
            replacement.as_str()
        }
        None => token,
    };

    let (width, height) = match REGULAR_SIZE.captures(size) {
        Some(caps) => {
            let left = &caps[1];
            let right = &caps[2];

            match (parse_aspect(left)?, parse_aspect(right)?) {
                (Some(_), Some(_)) => {
                    return Err(RenderError::SizeFormat(format!(
                        "两侧不能同时为比例：{size}"
                    )));
                }
                (Some(aspect), None) => {
                    let height = parse_dimension(right)?;
                    (scale(height, aspect.numerator, aspect.denominator)?, height)
                }
                (None, Some(aspect)) => {
                    let width = parse_dimension(left)?;
                    (width, scale(width, aspect.denominator, aspect.numerator)?)
                }
                (None, None) => (parse_dimension(left)?, parse_dimension(right)?),
            }
        }
        None => {
            let side = parse_dimension(size)?;
            (side, side)
        }
    };

    if width == 0 || height == 0 {
        return Err(RenderError::SizeFormat(format!("宽高必须大于 0：{size}")));
    }

    Ok(Dimensions { width, height })
}

/// 识别 `P:Q` 比例写法；不是比例写法时返回 `None`。
fn parse_aspect(part: &str) -> Result<Option<Aspect>, RenderError> {
    let Some(caps) = ASPECT_SIZE.captures(part) else {
        return Ok(None);
    };

    let numerator = parse_number(&caps[1])?;
    let denominator = parse_number(&caps[2])?;
    if numerator == 0 || denominator == 0 {
        return Err(RenderError::SizeFormat(format!("比例必须为正整数：{part}")));
    }

    Ok(Some(Aspect {
        numerator,
        denominator,
    }))
}

fn parse_number(part: &str) -> Result<u64, RenderError> {
    part.parse::<u64>()
        .map_err(|_| RenderError::SizeFormat(format!("无法识别的数字：{part}")))
}

fn parse_dimension(part: &str) -> Result<u32, RenderError> {
    part.parse::<u32>()
        .map_err(|_| RenderError::SizeFormat(format!("无法识别的尺寸：{part}")))
}

/// `base * multiplier / divisor`，整数截断。
fn scale(base: u32, multiplier: u64, divisor: u64) -> Result<u32, RenderError> {
    u64::from(base)
        .checked_mul(multiplier)
        .map(|value| value / divisor)
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| RenderError::SizeFormat("比例换算结果溢出".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn no_presets() -> HashMap<String, String> {
        HashMap::new()
    }

    fn assert_size_error(token: &str) {
        let result = parse_size(token, &no_presets());
        assert!(
            matches!(result, Err(RenderError::SizeFormat(_))),
            "expected size error for {token:?}, got {result:?}"
        );
    }

    #[test]
    fn parses_regular_sizes() {
        assert_eq!(parse_size("300x200", &no_presets()).unwrap(), Dimensions::new(300, 200));
        assert_eq!(parse_size("300X200", &no_presets()).unwrap(), Dimensions::new(300, 200));
    }

    #[test]
    fn parses_square_size() {
        assert_eq!(parse_size("300", &no_presets()).unwrap(), Dimensions::new(300, 300));
    }

    #[test]
    fn parses_aspect_sizes_with_truncation() {
        assert_eq!(parse_size("4:3x300", &no_presets()).unwrap(), Dimensions::new(400, 300));
        assert_eq!(parse_size("300x4:3", &no_presets()).unwrap(), Dimensions::new(300, 225));
        assert_eq!(parse_size("16:9x100", &no_presets()).unwrap(), Dimensions::new(177, 100));
        assert_eq!(parse_size("100x16:9", &no_presets()).unwrap(), Dimensions::new(100, 56));
    }

    #[test]
    fn rejects_aspect_on_both_sides() {
        assert_size_error("4:3x3:2");
    }

    #[test]
    fn rejects_zero_and_garbage() {
        for token in ["0", "0x0", "0x100", "100x0", "", "abc", "-5", "-5x10", "10x-5", "1:3x2"] {
            assert_size_error(token);
        }
    }

    #[test]
    fn rejects_zero_denominator_without_panicking() {
        assert_size_error("4:0x300");
        assert_size_error("300x0:3");
    }

    #[test]
    fn rejects_overflowing_aspect() {
        assert_size_error("4294967295:1x4294967295");
    }

    #[test]
    fn resolves_presets_before_parsing() {
        let mut presets = HashMap::new();
        presets.insert("banner".to_string(), "468x60".to_string());
        presets.insert("tv".to_string(), "4:3x480".to_string());

        assert_eq!(parse_size("banner", &presets).unwrap(), Dimensions::new(468, 60));
        assert_eq!(parse_size("tv", &presets).unwrap(), Dimensions::new(640, 480));
        assert_eq!(parse_size("50", &presets).unwrap(), Dimensions::new(50, 50));
    }

    proptest! {
        #[test]
        fn square_token_yields_square(n in 1u32..=100_000) {
            prop_assert_eq!(parse_size(&n.to_string(), &no_presets()).unwrap(), Dimensions::new(n, n));
        }

        #[test]
        fn regular_token_yields_literal_dimensions(w in 1u32..=100_000, h in 1u32..=100_000) {
            prop_assert_eq!(parse_size(&format!("{w}x{h}"), &no_presets()).unwrap(), Dimensions::new(w, h));
            prop_assert_eq!(parse_size(&format!("{w}X{h}"), &no_presets()).unwrap(), Dimensions::new(w, h));
        }
    }
}
