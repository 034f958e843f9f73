//! # 占位图服务 — 应用入口
//!
//! 本文件仅负责日志初始化、设置加载、字体加载与服务启动。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::sync::Arc;

use gummy_image::error::AppError;
use gummy_image::placeholder::{FontSlot, PlaceholderService};
use gummy_image::{server, settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("启动失败: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    log::info!("startup: begin");

    // 设置文件：命令行参数 > 环境变量 > 默认路径
    let settings_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(settings::SETTINGS_ENV).ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(settings::DEFAULT_SETTINGS_PATH));

    let settings = settings::load_settings_from_path(&settings_path)?;
    log::info!("startup: settings loaded");

    // 字体加载失败属于配置错误，直接终止启动
    let font_slot = FontSlot::from_path(settings.placeholder.font_path.clone());
    let font = font_slot.get_or_load()?;
    log::info!("startup: font loaded");

    let workers = settings.worker_count();
    let service = Arc::new(PlaceholderService::new(settings.placeholder, font));

    server::serve(service, &settings.listen_addr, workers)
}
