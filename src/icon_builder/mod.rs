//! # 图标构建模块（icon_builder）
//!
//! ## 设计思路
//!
//! 该模块将“源图加载校验 → 解码 → 补齐 alpha → 多尺寸缩放 → ICO 编码写出”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线，持有配置
//! - `loader`：负责本地文件读取与签名校验
//! - `pipeline`：负责解码、像素限制、缩放
//! - `encoder`：负责 ICO 容器编码与写出
//! - `inspect`：负责回读已有 ICO
//! - `config/error/size/source`：配置、错误、尺寸、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs / cli.rs（参数与配置合并）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（文件存在性 / 体积 / 签名）
//!    ├─ pipeline.rs（解码 + 像素限制 + 逐尺寸缩放）
//!    └─ encoder.rs（内存编码 ICO + 一次性写出）
//!    ↓
//! BuildReport / IconError
//! ```
//!
//! ## 分层职责建议
//!
//! - 默认尺寸与尺寸规则变更优先改 `size.rs`
//! - 滤镜、上限等策略变更优先改 `config.rs`
//! - 流程顺序变更优先改 `handler.rs`
//! - 单阶段行为优化分别改 `loader/pipeline/encoder`

mod config;
mod encoder;
mod error;
mod handler;
mod inspect;
mod loader;
mod pipeline;
mod size;
mod source;

pub use config::{IconConfig, ResizeFilter};
pub use error::IconError;
pub use handler::{BuildReport, IconBuilder, StageTimings};
pub use inspect::EmbeddedIcon;
pub use size::{DEFAULT_ICON_EDGES, IconSize, MAX_ICON_EDGE, TargetSizeSet};
pub use source::{NormalizedSource, ResizedVariant, SourceImage};
