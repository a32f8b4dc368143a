//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 库内核心流程只产生 `IconError`（加载 / 编码 / 配置三类），
//! 命令行入口额外需要表达“参数错误”“配置文件错误”等外围问题，
//! 因此在进程边界定义 `AppError`，由 `main.rs` 统一打印并决定退出码。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `IconError` 与 `std::io::Error` 提供 `From` 转换，调用侧直接 `?`。

use crate::icon_builder::IconError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标构建流程错误（加载 / 编码 / 配置校验）
    #[error("{0}")]
    Icon(#[from] IconError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置文件读取或解析失败
    #[error("配置文件错误: {0}")]
    Config(String),

    /// 命令行参数不合法
    #[error("参数错误: {0}")]
    Args(String),
}

impl AppError {
    /// 进程退出码：参数错误为 2，其余失败为 1。
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Args(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_error_message_is_passed_through() {
        let err: AppError = IconError::Load("文件不存在：a.png".to_string()).into();
        assert_eq!(err.to_string(), "加载错误：文件不存在：a.png");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn args_error_uses_usage_exit_code() {
        let err = AppError::Args("未知参数".to_string());
        assert_eq!(err.exit_code(), 2);
    }
}
