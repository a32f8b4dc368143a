//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 图标构建只有两类终止性失败：源图加载失败、图标编码/写出失败。
//! 另设 `Config` 表示构建器配置本身不合法（例如选择了最近邻滤镜），
//! 它在任何文件操作之前就会被拒绝。
//! 三者均不可恢复，调用侧只需按分支匹配并上报。

/// 图标构建统一错误类型。
///
/// 该类型会在进程边界被上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// 源图缺失、不可读、体积/像素超限或无法解码。
    #[error("加载错误：{0}")]
    Load(String),

    /// 目标目录不存在/不可写，或某个尺寸不符合 ICO 容器要求。
    #[error("编码错误：{0}")]
    Encode(String),

    #[error("配置错误：{0}")]
    Config(String),
}
