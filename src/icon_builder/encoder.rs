//! # 图标编码与写出模块
//!
//! ## 设计思路
//!
//! 先在内存中完成整个 ICO 容器的编码，再一次性写入目标路径：
//! 尺寸不合法、目标目录缺失、条目编码失败时都不会产生任何文件。
//!
//! ## 实现思路
//!
//! - 条目校验：正方形、`1..=256`、无重复、像素缓冲长度与尺寸一致。
//! - 每个条目都以 32 位 RGBA PNG 存储，完全不透明的图片也保留 alpha 通道；
//!   ICO 目录项显式记录宽高与位深，消费方（如操作系统）据此挑选最合适的尺寸。
//! - 写出前检查父目录存在，避免把“目录不存在”混成笼统的 I/O 错误。

use std::collections::HashSet;
use std::path::Path;

use image::ExtendedColorType;
use image::codecs::ico::{IcoEncoder, IcoFrame};

use super::source::ResizedVariant;
use super::{IconBuilder, IconError};

impl IconBuilder {
    /// 将全部缩放结果编码为一个 ICO 容器（内存字节）。
    pub(crate) fn encode_icon(variants: &[ResizedVariant]) -> Result<Vec<u8>, IconError> {
        Self::validate_variants(variants)?;

        let frames = variants
            .iter()
            .map(|variant| {
                log::debug!("🧱 ICO 条目：{} rgba8 png", variant.size);
                IcoFrame::as_png(
                    variant.rgba.as_raw(),
                    variant.size.width(),
                    variant.size.height(),
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| IconError::Encode(format!("编码 {} 条目失败：{}", variant.size, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut bytes = Vec::new();
        IcoEncoder::new(&mut bytes)
            .encode_images(&frames)
            .map_err(|e| IconError::Encode(format!("写入 ICO 容器失败：{}", e)))?;

        Ok(bytes)
    }

    fn validate_variants(variants: &[ResizedVariant]) -> Result<(), IconError> {
        if variants.is_empty() {
            return Err(IconError::Encode("没有可写入的图标尺寸".to_string()));
        }

        let mut seen = HashSet::with_capacity(variants.len());
        for variant in variants {
            variant.size.validate()?;

            if variant.rgba.dimensions() != (variant.size.width(), variant.size.height()) {
                return Err(IconError::Encode(format!(
                    "条目像素尺寸与声明不一致：声明 {} 实际 {}x{}",
                    variant.size,
                    variant.rgba.width(),
                    variant.rgba.height()
                )));
            }

            if !seen.insert(variant.size) {
                return Err(IconError::Encode(format!("图标尺寸重复：{}", variant.size)));
            }
        }

        Ok(())
    }

    /// 将编码好的容器写入目标路径。
    pub(crate) fn write_icon_file(bytes: &[u8], destination: &Path) -> Result<(), IconError> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(IconError::Encode(format!(
                    "目标目录不存在：{}",
                    parent.display()
                )));
            }
        }

        if destination.is_dir() {
            return Err(IconError::Encode(format!(
                "目标路径是目录：{}",
                destination.display()
            )));
        }

        std::fs::write(destination, bytes).map_err(|e| {
            IconError::Encode(format!("无法写入图标文件 {}：{}", destination.display(), e))
        })?;

        log::info!(
            "💾 图标已写入 - 路径: {} 大小: {:.1} KB",
            destination.display(),
            bytes.len() as f64 / 1024.0
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon_builder::IconSize;
    use ico::IconDir;
    use image::{ImageBuffer, Rgba, RgbaImage};
    use std::io::Cursor;

    fn variant(edge: u32) -> ResizedVariant {
        ResizedVariant {
            size: IconSize::square(edge),
            rgba: ImageBuffer::from_fn(edge, edge, |x, y| Rgba([x as u8, y as u8, 50, 255])),
        }
    }

    fn read_entries(bytes: &[u8]) -> Vec<(u32, u32, u16, bool)> {
        let dir = IconDir::read(Cursor::new(bytes)).expect("read back failed");
        dir.entries()
            .iter()
            .map(|e| (e.width(), e.height(), e.bits_per_pixel(), e.is_png()))
            .collect()
    }

    #[test]
    fn opaque_entries_keep_32_bit_alpha() {
        let variants = vec![variant(16), variant(32), variant(256)];
        let bytes = IconBuilder::encode_icon(&variants).expect("encode failed");

        assert_eq!(
            read_entries(&bytes),
            vec![(16, 16, 32, true), (32, 32, 32, true), (256, 256, 32, true)]
        );
    }

    #[test]
    fn single_colour_opaque_entry_is_not_palettized() {
        let flat = ResizedVariant {
            size: IconSize::square(16),
            rgba: RgbaImage::from_pixel(16, 16, Rgba([128, 128, 128, 255])),
        };
        let bytes = IconBuilder::encode_icon(&[flat]).expect("encode failed");

        assert_eq!(read_entries(&bytes), vec![(16, 16, 32, true)]);
    }

    #[test]
    fn directory_stores_256_as_zero() {
        let bytes = IconBuilder::encode_icon(&[variant(256)]).expect("encode failed");

        // header(6) + entry: width, height
        assert_eq!(&bytes[0..6], &[0, 0, 1, 0, 1, 0]);
        assert_eq!((bytes[6], bytes[7]), (0, 0));
        assert_eq!(u16::from_le_bytes([bytes[12], bytes[13]]), 32);
    }

    #[test]
    fn decoded_entry_keeps_pixels_and_alpha() {
        let source = ResizedVariant {
            size: IconSize::square(32),
            rgba: ImageBuffer::from_fn(32, 32, |x, y| Rgba([x as u8, y as u8, 50, (x * 8) as u8])),
        };
        let bytes = IconBuilder::encode_icon(std::slice::from_ref(&source)).expect("encode failed");

        let dir = IconDir::read(Cursor::new(bytes)).expect("read back failed");
        let decoded = dir.entries()[0].decode().expect("decode entry failed");
        assert_eq!(decoded.rgba_data(), source.rgba.as_raw().as_slice());
    }

    #[test]
    fn rejects_empty_oversized_and_duplicate_variants() {
        assert!(matches!(IconBuilder::encode_icon(&[]), Err(IconError::Encode(_))));

        let oversized = ResizedVariant {
            size: IconSize::square(512),
            rgba: RgbaImage::new(512, 512),
        };
        assert!(matches!(IconBuilder::encode_icon(&[oversized]), Err(IconError::Encode(_))));

        let duplicated = vec![variant(16), variant(16)];
        assert!(matches!(IconBuilder::encode_icon(&duplicated), Err(IconError::Encode(_))));
    }

    #[test]
    fn rejects_mismatched_pixel_buffer() {
        let broken = ResizedVariant {
            size: IconSize::square(32),
            rgba: RgbaImage::new(16, 16),
        };
        assert!(matches!(IconBuilder::encode_icon(&[broken]), Err(IconError::Encode(_))));
    }

    #[test]
    fn missing_parent_directory_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let destination = dir.path().join("no-such-dir").join("app.ico");

        let result = IconBuilder::write_icon_file(b"ico", &destination);
        assert!(matches!(result, Err(IconError::Encode(msg)) if msg.contains("目录不存在")));
        assert!(!destination.exists());
    }

    #[test]
    fn destination_that_is_a_directory_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir failed");

        let result = IconBuilder::write_icon_file(b"ico", dir.path());
        assert!(matches!(result, Err(IconError::Encode(_))));
    }
}
