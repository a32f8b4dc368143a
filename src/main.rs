//! # 图标生成工具 — 应用入口
//!
//! 本文件仅负责日志初始化、命令分发与退出码。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use icon_builder::cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = cli::parse_env().and_then(cli::run);

    if let Err(err) = result {
        log::error!("图标生成失败: {err}");
        eprintln!("✗ Error: {err}");
        if matches!(err, icon_builder::AppError::Args(_)) {
            eprintln!("\n{}", cli::USAGE);
        }
        std::process::exit(err.exit_code());
    }
}
