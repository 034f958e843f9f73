//! # HTTP 入口
//!
//! ## 设计思路
//!
//! 路由层只做 URL → `RenderRequest` 的参数适配与错误 → 状态码的映射，
//! 不承载业务逻辑。支持的路由：
//!
//! | 路由 | 说明 |
//! |------|------|
//! | `GET /` | 使用说明 |
//! | `GET /{size}` | 默认背景色 |
//! | `GET /{size}/{bgcolor}` | 指定背景色 |
//! | `GET /{size}/{bgcolor}/{fgcolor}` | 指定背景色与文字色 |
//!
//! 以上图片路由均可附带 `?text=...` 自定义文字，任一路径段可带 `.png/.jpg/.gif` 后缀。
//!
//! ## 实现思路
//!
//! 使用 `tiny_http` 同步服务器，固定数量的工作线程共享同一个 `Server`，
//! 每个请求在单个线程内同步处理完毕。

use std::sync::Arc;
use std::thread;

use tiny_http::{Header, Method, Response, Server};

use crate::error::AppError;
use crate::placeholder::{PlaceholderService, RenderError, RenderRequest};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

const INDEX_TEXT: &str = "gummy-image: placeholder images\n\
\n\
GET /{size}[/{bgcolor}[/{fgcolor}]][?text=label]\n\
\n\
  size     300x200 | 300 | 4:3x300 | 300x4:3 | preset name\n\
  bgcolor  F | FA | F0A | FAFAFA\n\
  fgcolor  same as bgcolor, black or white when omitted\n\
  format   append .png, .jpg or .gif to any segment\n";

/// 解析后的路由。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Image(RenderRequest),
    NotFound,
}

/// 与传输层无关的响应。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN,
            body: body.into().into_bytes(),
        }
    }
}

/// 将请求 URL（路径 + 查询串）解析为路由。
pub fn parse_route(raw_url: &str) -> Route {
    let (path, query) = match raw_url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw_url, None),
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Route::Index;
    }
    if segments.len() > 3 {
        return Route::NotFound;
    }

    let text = query.and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned())
    });

    Route::Image(RenderRequest {
        size: segments[0].to_string(),
        bgcolor: segments.get(1).map(|s| s.to_string()).unwrap_or_default(),
        fgcolor: segments.get(2).map(|s| s.to_string()).unwrap_or_default(),
        text,
    })
}

/// 将渲染错误映射为响应，格式错误不区分具体原因。
pub fn error_reply(error: &RenderError) -> Reply {
    match error {
        RenderError::SizeFormat(_) | RenderError::ColorFormat { .. } => {
            Reply::text(400, "Wrong size or color format")
        }
        RenderError::CapacityExceeded {
            max_width,
            max_height,
            ..
        } => Reply::text(
            400,
            format!("Image too big, maximum size is {max_width}x{max_height}"),
        ),
        RenderError::UnsupportedFormat(_) => Reply::text(400, "Unsupported image format"),
        RenderError::FontLoad(_) | RenderError::Encode(_) => {
            Reply::text(500, "Internal server error")
        }
    }
}

/// 处理单个请求。
pub fn handle(service: &PlaceholderService, method: &Method, raw_url: &str) -> Reply {
    if *method != Method::Get && *method != Method::Head {
        return Reply::text(405, "Method not allowed");
    }

    match parse_route(raw_url) {
        Route::Index => Reply::text(200, INDEX_TEXT),
        Route::NotFound => Reply::text(404, "Not found"),
        Route::Image(request) => match service.render(&request) {
            Ok(image) => Reply {
                status: 200,
                content_type: image.content_type(),
                body: image.bytes,
            },
            Err(err) => {
                if err.is_client_error() {
                    log::warn!("请求被拒绝 [{}] {}: {}", err.code(), raw_url, err);
                } else {
                    log::error!("请求处理失败 [{}] {}: {}", err.code(), raw_url, err);
                }
                error_reply(&err)
            }
        },
    }
}

/// 启动 HTTP 服务并阻塞直到所有工作线程退出。
pub fn serve(service: Arc<PlaceholderService>, addr: &str, workers: usize) -> Result<(), AppError> {
    let server = Server::http(addr)
        .map_err(|e| AppError::Server(format!("监听 {} 失败: {}", addr, e)))?;
    let server = Arc::new(server);

    log::info!("🚀 服务已启动: http://{} （工作线程 {}）", addr, workers);

    let mut handles = Vec::with_capacity(workers);
    for worker_id in 0..workers.max(1) {
        let server = Arc::clone(&server);
        let service = Arc::clone(&service);
        let handle = thread::Builder::new()
            .name(format!("gummy-worker-{worker_id}"))
            .spawn(move || worker_loop(&server, &service))?;
        handles.push(handle);
    }

    for handle in handles {
        if handle.join().is_err() {
            log::error!("工作线程异常退出");
        }
    }

    Ok(())
}

fn worker_loop(server: &Server, service: &PlaceholderService) {
    for request in server.incoming_requests() {
        let reply = handle(service, request.method(), request.url());
        let status = reply.status;

        let mut response = Response::from_data(reply.body).with_status_code(status);
        match Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
            Ok(header) => response = response.with_header(header),
            Err(()) => log::warn!("无效的 Content-Type: {}", reply.content_type),
        }

        if let Err(err) = request.respond(response) {
            log::warn!("写回响应失败（status={}）: {}", status, err);
        }
    }
}
