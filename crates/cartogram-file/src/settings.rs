//! 设计参数的JSON读写

use crate::error::FileError;
use cartogram_core::config::DesignConfig;
use std::path::Path;

/// 从JSON文件读取设计参数，缺省字段取默认值
pub fn load_config(path: &Path) -> Result<DesignConfig, FileError> {
    if !path.exists() {
        return Err(FileError::FileNotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path)?;
    let config: DesignConfig = serde_json::from_str(&text)?;
    config.validate()?;

    tracing::info!(
        "Loaded design config from {} (scale 1:{})",
        path.display(),
        config.drawing_scale()
    );

    Ok(config)
}

/// 保存设计参数
pub fn save_config(config: &DesignConfig, path: &Path) -> Result<(), FileError> {
    let text = serde_json::to_string_pretty(config)?;
    std::fs::write(path, text)?;

    tracing::info!("Saved design config to {}", path.display());
    Ok(())
}
