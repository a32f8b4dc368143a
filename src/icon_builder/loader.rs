//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 在“尽可能早”的阶段执行输入校验：存在性 → 体积 → 文件签名。
//! 目标是尽快失败，避免把非图片或超大文件交给解码器。
//!
//! ## 实现思路
//!
//! - 文件句柄只在 `read_file_scoped` 内存活，任何返回路径都会随作用域释放。
//! - 体积取自已打开句柄的 metadata，与后续读取的是同一个文件。
//! - 签名通过 `infer` 判断，只接受图片类 MIME。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::source::RawImageData;
use super::{IconBuilder, IconConfig, IconError};

const READ_BUFFER_INITIAL_CAPACITY: usize = 16 * 1024;

impl IconBuilder {
    /// 从本地路径加载源图原始字节。
    pub(super) fn load_from_file(
        &self,
        path: &Path,
        config: &IconConfig,
    ) -> Result<RawImageData, IconError> {
        log::info!("📁 开始读取源图 - 路径: {}", path.display());

        if !path.exists() {
            return Err(IconError::Load(format!("文件不存在：{}", path.display())));
        }
        if !path.is_file() {
            return Err(IconError::Load(format!("不是普通文件：{}", path.display())));
        }

        let bytes = Self::read_file_scoped(path, config.max_file_size)?;
        Self::validate_image_signature(&bytes)?;

        log::debug!("📦 源图读取完成 - {} 字节", bytes.len());

        Ok(RawImageData {
            bytes,
            source_hint: path.display().to_string(),
        })
    }

    fn read_file_scoped(path: &Path, max_file_size: u64) -> Result<Vec<u8>, IconError> {
        let mut file = File::open(path)
            .map_err(|e| IconError::Load(format!("无法打开图片文件：{}", e)))?;

        let metadata = file
            .metadata()
            .map_err(|e| IconError::Load(format!("无法读取文件信息：{}", e)))?;

        if metadata.len() > max_file_size {
            return Err(IconError::Load(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let capacity = usize::try_from(metadata.len())
            .unwrap_or(READ_BUFFER_INITIAL_CAPACITY)
            .max(READ_BUFFER_INITIAL_CAPACITY);
        let mut bytes = Vec::with_capacity(capacity);
        file.read_to_end(&mut bytes)
            .map_err(|e| IconError::Load(format!("无法读取图片文件：{}", e)))?;

        Ok(bytes)
    }

    fn validate_image_signature(bytes: &[u8]) -> Result<(), IconError> {
        if bytes.is_empty() {
            return Err(IconError::Load("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| IconError::Load("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(IconError::Load(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = ImageBuffer::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]));
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode test image");
        std::fs::write(path, cursor.into_inner()).expect("failed to write test image");
    }

    #[test]
    fn missing_file_is_load_error() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let builder = IconBuilder::new(IconConfig::default()).expect("builder init failed");

        let result = builder.load_from_file(&dir.path().join("missing.png"), &IconConfig::default());
        assert!(matches!(result, Err(IconError::Load(_))));
    }

    #[test]
    fn directory_is_load_error() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let builder = IconBuilder::new(IconConfig::default()).expect("builder init failed");

        let result = builder.load_from_file(dir.path(), &IconConfig::default());
        assert!(matches!(result, Err(IconError::Load(_))));
    }

    #[test]
    fn oversized_file_is_rejected_before_reading() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("big.png");
        write_png(&path, 64, 64);

        let mut config = IconConfig::default();
        config.max_file_size = 16;
        let builder = IconBuilder::new(config.clone()).expect("builder init failed");

        let result = builder.load_from_file(&path, &config);
        assert!(matches!(result, Err(IconError::Load(msg)) if msg.contains("文件过大")));
    }

    #[test]
    fn non_image_signature_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"just some text pretending to be a png").expect("write failed");
        let builder = IconBuilder::new(IconConfig::default()).expect("builder init failed");

        let result = builder.load_from_file(&path, &IconConfig::default());
        assert!(matches!(result, Err(IconError::Load(_))));
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").expect("write failed");
        let builder = IconBuilder::new(IconConfig::default()).expect("builder init failed");

        let result = builder.load_from_file(&path, &IconConfig::default());
        assert!(matches!(result, Err(IconError::Load(msg)) if msg.contains("为空")));
    }

    #[test]
    fn valid_png_is_loaded_with_hint() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("ok.png");
        write_png(&path, 8, 8);
        let builder = IconBuilder::new(IconConfig::default()).expect("builder init failed");

        let raw = builder
            .load_from_file(&path, &IconConfig::default())
            .expect("load should succeed");
        assert!(!raw.bytes.is_empty());
        assert!(raw.source_hint.ends_with("ok.png"));
    }
}
