//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义进程级统一的 `AppError` 枚举，覆盖启动阶段（配置、字体、监听端口）
//! 可能出现的全部失败，`main` 只需处理这一种错误。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `RenderError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 请求级错误不会上升到这里，由 `server` 模块直接映射为 HTTP 响应。

use crate::placeholder::RenderError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 配置文件读取或解析失败
    #[error("配置错误: {0}")]
    Config(String),

    /// 占位图流水线错误（字体加载等）
    #[error("{0}")]
    Render(#[from] RenderError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP 服务启动或运行失败
    #[error("服务错误: {0}")]
    Server(String),
}
