//! # 图标生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs  env_logger 初始化 + 退出码                      │
//! │     ↓                                                    │
//! │  cli ──────── pico-args 参数解析 / 配置合并               │
//! │     │            ↑                                       │
//! │     │         settings ── JSON 配置文件 (serde_json)      │
//! └─────┼────────────────────────────────────────────────────┘
//!       ↓ Result<BuildReport, IconError>
//! ┌─────┼────────────────────────────────────────────────────┐
//! │  icon_builder                                            │
//! │     ├─ loader    文件读取 + 签名校验 (infer)              │
//! │     ├─ pipeline  解码 (image) + 逐尺寸缩放 (fast_image_resize) │
//! │     ├─ encoder   ICO 编码 + 一次性写出 (image::codecs::ico) │
//! │     └─ inspect   回读已有 ICO (ico)                       │
//! │                                                          │
//! │  error ───── AppError (进程边界统一错误)                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，决定进程退出码 |
//! | [`icon_builder`] | 源图 → 多尺寸 ICO 的完整流程与回读 |
//! | [`cli`] | 命令行解析与执行 |
//! | [`settings`] | JSON 配置文件读取 |

pub mod cli;
pub mod error;
pub mod icon_builder;
pub mod settings;

pub use error::AppError;
pub use icon_builder::{
    BuildReport, EmbeddedIcon, IconBuilder, IconConfig, IconError, IconSize, ResizeFilter,
    TargetSizeSet,
};
