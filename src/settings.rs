use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::icon_builder::IconConfig;

/// 读取 JSON 配置文件；缺省字段保持默认值。
pub fn load_config_file(path: &Path) -> Result<IconConfig, AppError> {
    if !path.exists() {
        return Err(AppError::Config(format!("配置文件不存在：{}", path.display())));
    }

    let content = fs::read_to_string(path)?;
    let config = serde_json::from_str::<IconConfig>(&content)
        .map_err(|e| AppError::Config(format!("解析配置文件失败: {}", e)))?;

    log::info!("⚙️ 已加载配置文件：{}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon_builder::ResizeFilter;

    #[test]
    fn loads_partial_config() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("icon.json");
        fs::write(&path, r#"{ "max_file_size": 2048, "max_decoded_pixels": 1000000 }"#)
            .expect("write failed");

        let config = load_config_file(&path).expect("load config failed");
        assert_eq!(config.max_file_size, 2048);
        assert_eq!(config.max_decoded_pixels, 1_000_000);
        assert_eq!(config.resize_filter, ResizeFilter::Lanczos3);
    }

    #[test]
    fn missing_config_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let result = load_config_file(&dir.path().join("none.json"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn malformed_config_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("icon.json");
        fs::write(&path, "{ not json").expect("write failed");

        let result = load_config_file(&path);
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("解析配置文件失败")));
    }
}
