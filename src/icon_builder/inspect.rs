//! # 图标回读模块
//!
//! 读取已有 ICO 文件，列出每个条目的尺寸、位深、负载格式，并解码为 RGBA。
//! 用于命令行 `--inspect` 与构建结果的核对。

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ico::IconDir;
use image::RgbaImage;

use super::{IconBuilder, IconError, IconSize};

/// 已嵌入 ICO 的单个条目。
#[derive(Debug, Clone)]
pub struct EmbeddedIcon {
    pub size: IconSize,
    pub bits_per_pixel: u16,
    pub is_png: bool,
    pub rgba: RgbaImage,
}

impl EmbeddedIcon {
    pub fn is_fully_opaque(&self) -> bool {
        self.rgba.pixels().all(|p| p[3] == u8::MAX)
    }
}

impl IconBuilder {
    /// 读取 ICO 文件中的全部条目（按文件内顺序）。
    pub fn inspect(path: impl AsRef<Path>) -> Result<Vec<EmbeddedIcon>, IconError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| IconError::Load(format!("无法打开图标文件 {}：{}", path.display(), e)))?;

        let icon_dir = IconDir::read(BufReader::new(file))
            .map_err(|e| IconError::Load(format!("无法解析 ICO 容器：{}", e)))?;

        icon_dir
            .entries()
            .iter()
            .map(|entry| {
                let size = IconSize::new(entry.width(), entry.height());
                let decoded = entry
                    .decode()
                    .map_err(|e| IconError::Load(format!("无法解码 {} 条目：{}", size, e)))?;
                let rgba = RgbaImage::from_raw(decoded.width(), decoded.height(), decoded.rgba_data().to_vec())
                    .ok_or_else(|| IconError::Load(format!("{} 条目像素长度异常", size)))?;

                Ok(EmbeddedIcon {
                    size,
                    bits_per_pixel: entry.bits_per_pixel(),
                    is_png: entry.is_png(),
                    rgba,
                })
            })
            .collect()
    }
}
