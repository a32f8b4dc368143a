//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconBuilder` 只负责流程编排与配置持有，不关心命令行或进程退出。
//! 处理链路固定为：
//! 1. 校验目标尺寸集合
//! 2. 加载源图字节并解码
//! 3. 补齐 alpha 通道
//! 4. 逐个尺寸从同一份源图缩放
//! 5. 内存中编码 ICO，一次性写出
//!
//! ## 实现思路
//!
//! - 任一阶段失败即整体失败，不重试、不降级、不清理。
//! - 记录 `load/decode/resize/encode/total` 阶段耗时，便于性能诊断。

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::size::describe_sizes;
use super::{IconConfig, IconError, IconSize, TargetSizeSet};

/// 图标构建器。
pub struct IconBuilder {
    pub(super) config: IconConfig,
}

/// 各阶段耗时。
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub load: Duration,
    pub decode: Duration,
    pub resize: Duration,
    pub encode: Duration,
    pub total: Duration,
}

/// 一次成功构建的结果。
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// 写出的图标文件路径。
    pub destination: PathBuf,
    /// 已嵌入的尺寸，顺序与请求一致。
    pub sizes: Vec<IconSize>,
    /// 源图原本是否缺少 alpha 通道。
    pub alpha_added: bool,
    /// 写出的字节数。
    pub bytes_written: usize,
    pub timings: StageTimings,
}

impl BuildReport {
    pub fn sizes_line(&self) -> String {
        describe_sizes(&self.sizes)
    }
}

/// 控制台确认信息：第一行为目标路径，第二行为逗号分隔的 `WxH` 列表。
impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "✓ Successfully created {}", self.destination.display())?;
        write!(f, "  Sizes included: {}", self.sizes_line())
    }
}

impl IconBuilder {
    /// 根据配置创建构建器。
    ///
    /// # 示例
    /// ```rust
    /// use icon_builder::{IconBuilder, IconConfig};
    ///
    /// let builder = IconBuilder::new(IconConfig::default())?;
    /// assert_eq!(builder.config().resize_filter.as_str(), "lanczos3");
    /// # Ok::<(), icon_builder::IconError>(())
    /// ```
    pub fn new(config: IconConfig) -> Result<Self, IconError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// 处理主入口：读取源图，生成多尺寸副本并写出 ICO。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use icon_builder::{IconBuilder, IconConfig, TargetSizeSet};
    ///
    /// let builder = IconBuilder::new(IconConfig::default())?;
    /// let report = builder.build("icon.png", "app.ico", &TargetSizeSet::default())?;
    /// println!("{report}");
    /// # Ok::<(), icon_builder::IconError>(())
    /// ```
    pub fn build(
        &self,
        source_path: impl AsRef<Path>,
        destination_path: impl AsRef<Path>,
        sizes: &TargetSizeSet,
    ) -> Result<BuildReport, IconError> {
        let source_path = source_path.as_ref();
        let destination = destination_path.as_ref();
        let config = &self.config;
        let total_start = Instant::now();

        sizes.validate()?;

        let load_start = Instant::now();
        let raw = self.load_from_file(source_path, config)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let source = self.decode_source(raw, config)?.ensure_alpha();
        let decode_elapsed = decode_start.elapsed();

        let resize_start = Instant::now();
        let variants = self.resize_all(&source, sizes.as_slice(), config)?;
        let resize_elapsed = resize_start.elapsed();

        let encode_start = Instant::now();
        let bytes = Self::encode_icon(&variants)?;
        Self::write_icon_file(&bytes, destination)?;
        let encode_elapsed = encode_start.elapsed();

        let timings = StageTimings {
            load: load_elapsed,
            decode: decode_elapsed,
            resize: resize_elapsed,
            encode: encode_elapsed,
            total: total_start.elapsed(),
        };

        log::info!(
            "✅ 图标构建完成 - load={}ms decode={}ms resize={}ms encode={}ms total={}ms",
            timings.load.as_millis(),
            timings.decode.as_millis(),
            timings.resize.as_millis(),
            timings.encode.as_millis(),
            timings.total.as_millis()
        );

        Ok(BuildReport {
            destination: destination.to_path_buf(),
            sizes: sizes.as_slice().to_vec(),
            alpha_added: source.alpha_added(),
            bytes_written: bytes.len(),
            timings,
        })
    }
}
