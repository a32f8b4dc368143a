//! # 解码与缩放流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 各尺寸 RGBA”的过程集中管理：
//! 先读 header 尺寸做像素上限检查，再完整解码；
//! 每个目标尺寸都直接从补齐 alpha 后的源图缩放，不在已缩小的结果上继续缩放，
//! 避免重采样误差逐级累积。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素上限快速拒绝
//! 3. 完整解码
//! 4. 对每个目标尺寸：`fast_image_resize` 卷积缩放（自动预乘 alpha），
//!    失败时回退 `image::imageops::resize`
//! 5. 校验输出尺寸与字节长度一致性

use fast_image_resize as fr;
use image::{GenericImageView, ImageBuffer, ImageReader, Rgba, RgbaImage};
use std::io::Cursor;

use super::source::{NormalizedSource, RawImageData, ResizedVariant, SourceImage};
use super::{IconBuilder, IconConfig, IconError, IconSize, ResizeFilter};

impl IconBuilder {
    /// 将原始字节解码为源图。
    pub(super) fn decode_source(
        &self,
        raw: RawImageData,
        config: &IconConfig,
    ) -> Result<SourceImage, IconError> {
        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;

        let decoded = ImageReader::new(Cursor::new(&raw.bytes))
            .with_guessed_format()
            .map_err(|e| IconError::Load(format!("无法识别图片格式：{}", e)))?
            .decode()
            .map_err(|e| IconError::Load(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        Self::validate_pixel_limits(config, width, height)?;

        log::info!(
            "✅ 源图解码成功 - 来源: {} 尺寸: {}x{} 颜色: {:?}",
            raw.source_hint,
            width,
            height,
            decoded.color()
        );

        Ok(SourceImage::new(decoded, raw.source_hint))
    }

    /// 仅通过图片头信息读取宽高。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), IconError> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| IconError::Load(format!("无法识别图片格式：{}", e)))?
            .into_dimensions()
            .map_err(|e| IconError::Load(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_pixel_limits(config: &IconConfig, width: u32, height: u32) -> Result<(), IconError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| IconError::Load("图片像素数溢出".to_string()))?;

        if pixels == 0 {
            return Err(IconError::Load("图片尺寸为 0".to_string()));
        }

        if pixels > config.max_decoded_pixels {
            return Err(IconError::Load(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    /// 按顺序为每个目标尺寸生成独立副本。
    pub(super) fn resize_all(
        &self,
        source: &NormalizedSource,
        sizes: &[IconSize],
        config: &IconConfig,
    ) -> Result<Vec<ResizedVariant>, IconError> {
        let mut resizer = fr::Resizer::new();
        sizes
            .iter()
            .map(|size| Self::resize_variant(&mut resizer, source.rgba(), *size, config.resize_filter))
            .collect()
    }

    /// 将源图缩放到指定尺寸。
    ///
    /// 源图尺寸与目标一致时直接复制像素。
    pub(crate) fn resize_variant(
        resizer: &mut fr::Resizer,
        source: &RgbaImage,
        size: IconSize,
        filter: ResizeFilter,
    ) -> Result<ResizedVariant, IconError> {
        size.validate()?;
        let (target_width, target_height) = (size.width(), size.height());

        let rgba = if source.dimensions() == (target_width, target_height) {
            source.clone()
        } else {
            match Self::resize_with_fast_image_resize(resizer, source, target_width, target_height, filter) {
                Ok(resized) => resized,
                Err(err) => {
                    log::warn!(
                        "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                        err
                    );
                    image::imageops::resize(source, target_width, target_height, filter.to_image_filter())
                }
            }
        };

        if rgba.dimensions() != (target_width, target_height) {
            return Err(IconError::Encode(format!(
                "缩放输出尺寸异常：期望 {} 实际 {}x{}",
                size,
                rgba.width(),
                rgba.height()
            )));
        }

        log::debug!(
            "🧩 生成图标尺寸：{}x{} -> {}（filter={}）",
            source.width(),
            source.height(),
            size,
            filter.as_str()
        );

        Ok(ResizedVariant { size, rgba })
    }

    fn resize_with_fast_image_resize(
        resizer: &mut fr::Resizer,
        source: &RgbaImage,
        target_width: u32,
        target_height: u32,
        filter: ResizeFilter,
    ) -> Result<RgbaImage, IconError> {
        let (src_width, src_height) = source.dimensions();

        let src_image = fr::images::ImageRef::new(
            src_width,
            src_height,
            source.as_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| IconError::Encode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(filter.to_fast_filter()));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| IconError::Encode(format!("fast_image_resize 执行失败：{}", e)))?;

        ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
            .ok_or_else(|| IconError::Encode("fast_image_resize 输出缓冲长度异常".to_string()))
    }
}
