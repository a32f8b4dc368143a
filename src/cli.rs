//! # 命令行模块
//!
//! ## 设计思路
//!
//! 不带任何参数时行为与固定常量一致：`icon.png` → `app.ico`，默认六个尺寸。
//! 参数只做覆盖，配置优先级：内置默认 < `--config` 文件 < 命令行标志。
//!
//! ## 实现思路
//!
//! - 使用 `pico-args` 解析，先取具名选项，再取位置参数，最后拒绝多余参数。
//! - 解析结果为 `Command`，执行由 `run` 完成，`main.rs` 只负责打印错误与退出码。

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::AppError;
use crate::icon_builder::{IconBuilder, IconConfig, ResizeFilter, TargetSizeSet};
use crate::settings;

pub const DEFAULT_SOURCE: &str = "icon.png";
pub const DEFAULT_DESTINATION: &str = "app.ico";

pub const USAGE: &str = "\
Usage: icon-builder [SOURCE] [DEST] [OPTIONS]
       icon-builder --inspect FILE.ico

Arguments:
  SOURCE               source image (default: icon.png)
  DEST                 output icon (default: app.ico)

Options:
  --sizes LIST         comma separated sizes, e.g. 16,32,48x48 (default: 16,32,48,64,128,256)
  --filter NAME        lanczos3 | catmull_rom | mitchell | bilinear (default: lanczos3)
  --config FILE        JSON config file
  --inspect FILE       list the entries of an existing icon
  -h, --help           print this help";

/// 解析后的命令。
#[derive(Debug)]
pub enum Command {
    Build(BuildArgs),
    Inspect(PathBuf),
    Help,
}

#[derive(Debug)]
pub struct BuildArgs {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub sizes: TargetSizeSet,
    pub filter: Option<ResizeFilter>,
    pub config_path: Option<PathBuf>,
}

impl BuildArgs {
    /// 合并配置文件与命令行覆盖项。
    pub fn resolve_config(&self) -> Result<IconConfig, AppError> {
        let mut config = match &self.config_path {
            Some(path) => settings::load_config_file(path)?,
            None => IconConfig::default(),
        };

        if let Some(filter) = self.filter {
            config.resize_filter = filter;
        }

        Ok(config)
    }
}

pub fn parse_env() -> Result<Command, AppError> {
    parse_args(std::env::args_os().skip(1).collect())
}

pub fn parse_args(raw: Vec<OsString>) -> Result<Command, AppError> {
    let mut args = pico_args::Arguments::from_vec(raw);

    if args.contains(["-h", "--help"]) {
        return Ok(Command::Help);
    }

    let args_err = |e: pico_args::Error| AppError::Args(e.to_string());

    if let Some(path) = args.opt_value_from_str::<_, PathBuf>("--inspect").map_err(args_err)? {
        reject_leftovers(args.finish())?;
        return Ok(Command::Inspect(path));
    }

    let sizes = args
        .opt_value_from_fn("--sizes", |s| s.parse::<TargetSizeSet>())
        .map_err(args_err)?
        .unwrap_or_default();
    let filter = args
        .opt_value_from_fn("--filter", ResizeFilter::from_str)
        .map_err(args_err)?;
    let config_path = args
        .opt_value_from_str::<_, PathBuf>("--config")
        .map_err(args_err)?;

    let source = args
        .opt_free_from_str::<PathBuf>()
        .map_err(args_err)?
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
    let destination = args
        .opt_free_from_str::<PathBuf>()
        .map_err(args_err)?
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION));

    reject_leftovers(args.finish())?;

    Ok(Command::Build(BuildArgs {
        source,
        destination,
        sizes,
        filter,
        config_path,
    }))
}

fn reject_leftovers(rest: Vec<OsString>) -> Result<(), AppError> {
    if rest.is_empty() {
        return Ok(());
    }
    let joined = rest
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    Err(AppError::Args(format!("无法识别的参数：{}", joined)))
}

/// 执行命令并向标准输出打印结果。
pub fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Inspect(path) => {
            let entries = IconBuilder::inspect(&path)?;
            println!("{} ({} entries)", path.display(), entries.len());
            for entry in &entries {
                println!(
                    "  {:>9}  {:>2} bpp  {}  {}",
                    entry.size.to_string(),
                    entry.bits_per_pixel,
                    if entry.is_png { "png" } else { "bmp" },
                    if entry.is_fully_opaque() { "opaque" } else { "alpha" }
                );
            }
            Ok(())
        }
        Command::Build(args) => {
            let config = args.resolve_config()?;
            log::debug!(
                "⚙️ 生效配置：filter={} max_file_size={} max_decoded_pixels={}",
                config.resize_filter.as_str(),
                config.max_file_size,
                config.max_decoded_pixels
            );

            let builder = IconBuilder::new(config)?;
            let report = builder.build(&args.source, &args.destination, &args.sizes)?;
            println!("{report}");
            Ok(())
        }
    }
}
