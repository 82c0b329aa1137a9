//! 设计参数配置

use crate::error::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};

/// 土方设计的绘图参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// 全局比例系数，1.0 对应 1:1000
    pub scale_factor: f64,
    /// 填方图形的填充颜色（ACI）
    pub fill_color: u8,
    /// 挖方图形的填充颜色（ACI）
    pub cut_color: u8,
    /// 零线颜色（ACI）
    pub zero_line_color: u8,
    /// 施工高度文字高度（乘以比例系数前）
    pub text_height: f64,
    /// 填充图案名称
    pub hatch_pattern: String,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            fill_color: 1,
            cut_color: 2,
            zero_line_color: 1,
            text_height: 1.5,
            hatch_pattern: "ANSI31".to_string(),
        }
    }
}

impl DesignConfig {
    /// 图纸比例分母，例如 1:500 返回 500
    pub fn drawing_scale(&self) -> f64 {
        1000.0 / self.scale_factor
    }

    /// 设置比例系数，必须为正
    pub fn set_scale_factor(&mut self, scale_factor: f64) -> GeoResult<()> {
        if !(scale_factor.is_finite() && scale_factor > 0.0) {
            return Err(GeoError::InvalidParameter(format!(
                "Scale factor must be positive, got {scale_factor}"
            )));
        }
        self.scale_factor = scale_factor;
        Ok(())
    }

    /// 按图形平均施工高度选择填充颜色
    pub fn hatch_color(&self, average_elevation: f64) -> u8 {
        if average_elevation >= 0.0 {
            self.fill_color
        } else {
            self.cut_color
        }
    }

    /// 按比例缩放后的文字高度
    pub fn scaled_text_height(&self) -> f64 {
        self.text_height * self.scale_factor
    }

    /// 检查从文件读入的配置
    pub fn validate(&self) -> GeoResult<()> {
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(GeoError::InvalidParameter(format!(
                "Scale factor must be positive, got {}",
                self.scale_factor
            )));
        }
        if !(self.text_height > 0.0) {
            return Err(GeoError::InvalidParameter(format!(
                "Text height must be positive, got {}",
                self.text_height
            )));
        }
        Ok(())
    }
}
