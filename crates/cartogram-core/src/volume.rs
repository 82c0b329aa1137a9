//! 土方量分级统计
//!
//! 按图形平均施工高度（厘米）分为四档：
//! - 填方：≥ 0
//! - 浅挖（Cut1）：−15 ≤ h < 0
//! - 中挖（Cut2）：−50 ≤ h < −15
//! - 大开挖（Cut3）：h < −50

use serde::{Deserialize, Serialize};
use std::fmt;

/// 浅挖下限（厘米）
pub const SHALLOW_CUT_LIMIT_CM: f64 = -15.0;

/// 中挖下限（厘米）
pub const MEDIUM_CUT_LIMIT_CM: f64 = -50.0;

/// 土方分档
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeBand {
    Fill,
    Cut1,
    Cut2,
    Cut3,
}

impl VolumeBand {
    /// 按平均施工高度（厘米）分档
    pub fn classify(average_cm: f64) -> Self {
        if average_cm >= 0.0 {
            VolumeBand::Fill
        } else if average_cm >= SHALLOW_CUT_LIMIT_CM {
            VolumeBand::Cut1
        } else if average_cm >= MEDIUM_CUT_LIMIT_CM {
            VolumeBand::Cut2
        } else {
            VolumeBand::Cut3
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VolumeBand::Fill => "Fill",
            VolumeBand::Cut1 => "Shallow cut up to 0.15",
            VolumeBand::Cut2 => "Shallow cut 0.15 to 0.50",
            VolumeBand::Cut3 => "Mass excavation",
        }
    }
}

/// 各档土方量合计（立方米，取绝对值累加）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeReport {
    pub fill: f64,
    pub cut1: f64,
    pub cut2: f64,
    pub cut3: f64,
}

impl VolumeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由（平均施工高度厘米, 土方量）序列汇总
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut report = Self::new();
        for (average_cm, volume) in pairs {
            report.add(average_cm, volume);
        }
        report
    }

    /// 累加一个图形，返回其所在分档
    pub fn add(&mut self, average_cm: f64, volume: f64) -> VolumeBand {
        let band = VolumeBand::classify(average_cm);
        *self.bucket_mut(band) += volume.abs();
        band
    }

    pub fn total(&self, band: VolumeBand) -> f64 {
        match band {
            VolumeBand::Fill => self.fill,
            VolumeBand::Cut1 => self.cut1,
            VolumeBand::Cut2 => self.cut2,
            VolumeBand::Cut3 => self.cut3,
        }
    }

    pub fn total_cut(&self) -> f64 {
        self.cut1 + self.cut2 + self.cut3
    }

    fn bucket_mut(&mut self, band: VolumeBand) -> &mut f64 {
        match band {
            VolumeBand::Fill => &mut self.fill,
            VolumeBand::Cut1 => &mut self.cut1,
            VolumeBand::Cut2 => &mut self.cut2,
            VolumeBand::Cut3 => &mut self.cut3,
        }
    }
}

impl fmt::Display for VolumeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for band in [
            VolumeBand::Cut1,
            VolumeBand::Cut2,
            VolumeBand::Cut3,
            VolumeBand::Fill,
        ] {
            writeln!(f, "{}: {:.0}", band.label(), self.total(band))?;
        }
        Ok(())
    }
}
