// End-to-end tests for the placeholder pipeline (resolve -> canvas -> label -> encode)
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gummy_image::placeholder::{
    Canvas, Dimensions, FontFace, GlyphRenderer, OutputFormat, PlaceholderConfig,
    PlaceholderService, RenderError, RenderRequest, parse_size,
};
use image::Rgb;

#[derive(Default)]
struct RecordingRenderer {
    labels: Mutex<Vec<(String, Rgb<u8>)>>,
}

impl GlyphRenderer for RecordingRenderer {
    fn draw_text(
        &self,
        _canvas: &mut Canvas,
        text: &str,
        _font_size: u32,
        _origin: (i64, i64),
        color: Rgb<u8>,
    ) -> Result<(), RenderError> {
        self.labels
            .lock()
            .expect("labels lock")
            .push((text.to_string(), color));
        Ok(())
    }
}

fn service_with(renderer: Arc<RecordingRenderer>) -> PlaceholderService {
    let config = PlaceholderConfig {
        max_width: 2000,
        max_height: 2000,
        ..PlaceholderConfig::default()
    };
    PlaceholderService::new(config, renderer)
}

#[test]
fn default_request_renders_fafafa_png_with_size_label() {
    let renderer = Arc::new(RecordingRenderer::default());
    let service = service_with(Arc::clone(&renderer));

    let request = RenderRequest::new("300x200").with_text("");
    let image = service.render(&request).expect("render should succeed");

    assert_eq!(image.format, OutputFormat::Png);
    assert_eq!(image.content_type(), "image/png");

    let decoded = image::load_from_memory(&image.bytes)
        .expect("png decode")
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (300, 200));
    assert!(decoded.pixels().all(|p| p.0 == [0xFA, 0xFA, 0xFA, 255]));

    let labels = renderer.labels.lock().expect("labels lock");
    assert_eq!(labels.as_slice(), &[("300x200".to_string(), Rgb([0, 0, 0]))]);
}

#[test]
fn dark_background_gets_white_label() {
    let renderer = Arc::new(RecordingRenderer::default());
    let service = service_with(Arc::clone(&renderer));

    service
        .render(&RenderRequest::new("4:3x300").with_bgcolor("0.jpg"))
        .expect("render should succeed");

    let labels = renderer.labels.lock().expect("labels lock");
    assert_eq!(labels[0].0, "400x300");
    assert_eq!(labels[0].1, Rgb([255, 255, 255]));
}

#[test]
fn custom_label_and_foreground() {
    let renderer = Arc::new(RecordingRenderer::default());
    let service = service_with(Arc::clone(&renderer));

    let err = service
        .render(
            &RenderRequest::new("banner.gif")
                .with_fgcolor("F00")
                .with_text("Ad slot"),
        )
        .expect_err("unknown preset should fail");
    assert!(matches!(err, RenderError::SizeFormat(_)));

    service
        .render(
            &RenderRequest::new("fullbanner.gif")
                .with_fgcolor("F00")
                .with_text("Ad slot"),
        )
        .expect("preset render");

    let labels = renderer.labels.lock().expect("labels lock");
    assert_eq!(labels.as_slice(), &[("Ad slot".to_string(), Rgb([255, 0, 0]))]);
}

#[test]
fn failures_do_not_reach_the_renderer() {
    let renderer = Arc::new(RecordingRenderer::default());
    let service = service_with(Arc::clone(&renderer));

    let cases = [
        RenderRequest::new("0"),
        RenderRequest::new("0x0"),
        RenderRequest::new("4:3x3:2"),
        RenderRequest::new("300").with_bgcolor("ZZ"),
        RenderRequest::new("300").with_fgcolor("nothex"),
        RenderRequest::new("2001x10"),
        RenderRequest::new("10x2001"),
    ];

    for request in &cases {
        let err = service.render(request).expect_err("request should fail");
        assert!(err.is_client_error(), "{request:?} -> {err}");
    }

    assert!(renderer.labels.lock().expect("labels lock").is_empty());
}

#[test]
fn size_parsing_examples() {
    let presets = HashMap::new();
    assert_eq!(parse_size("4:3x300", &presets).unwrap(), Dimensions::new(400, 300));
    assert_eq!(parse_size("300x4:3", &presets).unwrap(), Dimensions::new(300, 225));
    assert_eq!(parse_size("300", &presets).unwrap(), Dimensions::new(300, 300));
}

#[test]
#[ignore = "requires a TrueType font file in GUMMY_TEST_FONT"]
fn real_font_draws_label_pixels() {
    let font_path = std::env::var("GUMMY_TEST_FONT").expect("GUMMY_TEST_FONT not set");
    let font = Arc::new(FontFace::from_path(font_path).expect("font should load"));
    let service = PlaceholderService::new(PlaceholderConfig::default(), font);

    let image = service
        .render(&RenderRequest::new("300x200"))
        .expect("render should succeed");
    let decoded = image::load_from_memory(&image.bytes)
        .expect("png decode")
        .to_rgba8();

    let drawn = decoded
        .pixels()
        .filter(|p| p.0 != [0xFA, 0xFA, 0xFA, 255])
        .count();
    assert!(drawn > 0, "label should change some pixels");
    assert!(drawn < 300 * 200 / 2, "label should not cover the canvas");
}
