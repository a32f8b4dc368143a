//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将流水线各阶段的产物拆成独立类型，阶段之间只能按顺序转换：
//! - `RawImageData`：已读入但未解码的字节
//! - `SourceImage`：解码后的原始像素（格式不定）
//! - `NormalizedSource`：补齐 alpha 后的 RGBA8 像素，只读
//! - `ResizedVariant`：某个目标尺寸的独立 RGBA8 副本

use image::{DynamicImage, GenericImageView, RgbaImage};

use super::IconSize;

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

/// 解码后的源图。
#[derive(Debug)]
pub struct SourceImage {
    pub(crate) image: DynamicImage,
    pub(crate) source_hint: String,
}

impl SourceImage {
    pub fn new(image: DynamicImage, source_hint: impl Into<String>) -> Self {
        Self {
            image,
            source_hint: source_hint.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn source_hint(&self) -> &str {
        &self.source_hint
    }

    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// 补齐 alpha 通道并统一为 RGBA8。
    ///
    /// 无 alpha 的图片：颜色值保持不变，新增 alpha 全部为 255。
    /// 已有 alpha 但非 8 位 RGBA 的图片（LA8 / RGBA16 / RGBA32F）同样转换为 RGBA8，
    /// ICO 条目只接受每通道 8 位。
    pub fn ensure_alpha(self) -> NormalizedSource {
        let alpha_added = !self.has_alpha();
        let (width, height) = self.image.dimensions();

        if alpha_added {
            log::debug!(
                "🎨 源图缺少 alpha 通道，补齐为不透明 RGBA - 来源: {} 尺寸: {}x{}",
                self.source_hint(),
                width,
                height
            );
        }

        NormalizedSource {
            rgba: self.image.into_rgba8(),
            alpha_added,
        }
    }
}

/// 补齐 alpha 后的源图，所有缩放都从这里读取。
#[derive(Debug)]
pub struct NormalizedSource {
    rgba: RgbaImage,
    alpha_added: bool,
}

impl NormalizedSource {
    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// 源图原本是否缺少 alpha 通道。
    pub fn alpha_added(&self) -> bool {
        self.alpha_added
    }
}

/// 某个目标尺寸的缩放结果。
#[derive(Debug, Clone)]
pub struct ResizedVariant {
    pub size: IconSize,
    pub rgba: RgbaImage,
}
