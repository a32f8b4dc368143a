//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `IconConfig`：源文件体积上限、解码像素上限、
//! 缩放滤镜。默认值即生产可用配置，
//! 配置文件与命令行只做局部覆盖。
//!
//! ## 实现思路
//!
//! - `Default` 提供高质量配置（Lanczos3）。
//! - `ResizeFilter` 负责字符串解析与反向输出，
//!   serde 反序列化也复用同一套解析（`try_from = "String"`）。
//! - 最近邻滤镜在小尺寸下锯齿明显，解析阶段直接拒绝。

use fast_image_resize as fr;
use image::imageops::FilterType;
use serde::Deserialize;

use super::IconError;

/// 图标构建配置。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// 读取源图时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 缩放滤镜。
    pub resize_filter: ResizeFilter,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            resize_filter: ResizeFilter::Lanczos3,
        }
    }
}

impl IconConfig {
    /// 校验配置取值。
    pub fn validate(&self) -> Result<(), IconError> {
        if self.max_file_size == 0 {
            return Err(IconError::Config("max_file_size 必须大于 0".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(IconError::Config("max_decoded_pixels 必须大于 0".to_string()));
        }
        Ok(())
    }
}

/// 缩放滤镜（均为卷积类滤镜）。
///
/// - `Lanczos3`：默认，锐利且抗锯齿
/// - `CatmullRom` / `Mitchell`：略柔和
/// - `Bilinear`：最快，仍优于最近邻
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ResizeFilter {
    Lanczos3,
    CatmullRom,
    Mitchell,
    Bilinear,
}

impl ResizeFilter {
    /// 从外部字符串解析滤镜。
    ///
    /// # 示例
    /// ```rust
    /// use icon_builder::ResizeFilter;
    ///
    /// let f = ResizeFilter::from_str("lanczos3")?;
    /// assert_eq!(f.as_str(), "lanczos3");
    /// # Ok::<(), icon_builder::IconError>(())
    /// ```
    pub fn from_str(filter: &str) -> Result<Self, IconError> {
        match filter.trim().to_lowercase().replace('-', "_").as_str() {
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            "catmull_rom" | "catmullrom" => Ok(Self::CatmullRom),
            "mitchell" => Ok(Self::Mitchell),
            "bilinear" | "triangle" => Ok(Self::Bilinear),
            "nearest" | "box" => Err(IconError::Config(format!(
                "不支持的缩放滤镜：{}（最近邻在小尺寸图标上会产生明显锯齿）",
                filter.trim()
            ))),
            other => Err(IconError::Config(format!(
                "未知缩放滤镜：{}（可选：lanczos3 / catmull_rom / mitchell / bilinear）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lanczos3 => "lanczos3",
            Self::CatmullRom => "catmull_rom",
            Self::Mitchell => "mitchell",
            Self::Bilinear => "bilinear",
        }
    }

    /// 映射到 `fast_image_resize` 的卷积滤镜。
    pub(crate) fn to_fast_filter(self) -> fr::FilterType {
        match self {
            Self::Lanczos3 => fr::FilterType::Lanczos3,
            Self::CatmullRom => fr::FilterType::CatmullRom,
            Self::Mitchell => fr::FilterType::Mitchell,
            Self::Bilinear => fr::FilterType::Bilinear,
        }
    }

    /// 映射到 `image` 的滤镜（回退路径使用）。
    ///
    /// `image` 没有 Mitchell，用同为三次样条族的 CatmullRom 代替。
    pub(crate) fn to_image_filter(self) -> FilterType {
        match self {
            Self::Lanczos3 => FilterType::Lanczos3,
            Self::CatmullRom | Self::Mitchell => FilterType::CatmullRom,
            Self::Bilinear => FilterType::Triangle,
        }
    }
}

impl TryFrom<String> for ResizeFilter {
    type Error = IconError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}
