//! # 占位图服务 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  HTTP 客户端 (<img src>)                 │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ GET /{size}/{bgcolor}/{fgcolor}?text=
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            服务端 (Rust)                         │
//! │                                                          │
//! │  ┌─ server ────── tiny_http 路由 + 状态码映射             │
//! │  │                                                       │
//! │  ├─ settings ──── JSON 设置文件                          │
//! │  │                                                       │
//! │  ├─ placeholder ─ 解析·填充·排版·编码                    │
//! │  │   ├─ size / color   参数解析                          │
//! │  │   ├─ canvas / label 画布与文字                        │
//! │  │   ├─ font           ab_glyph 字体（进程内只加载一次） │
//! │  │   └─ encoder        PNG / JPEG / GIF                  │
//! │  │                                                       │
//! │  └─ error ─────── AppError (统一错误类型)                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，启动流程的返回类型 |
//! | [`settings`] | 设置文件加载与默认值 |
//! | [`placeholder`] | 尺寸/颜色解析、画布、文字布局、编码与服务状态 |
//! | [`server`] | URL 路由、错误到 HTTP 状态码的映射、工作线程 |

pub mod error;
pub mod placeholder;
pub mod server;
pub mod settings;
