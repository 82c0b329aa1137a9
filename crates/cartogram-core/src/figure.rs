//! 图形（填挖区域）及其派生数据

use crate::error::{GeoError, GeoResult};
use crate::handle::Handle;
use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 图形：按顺序排列的作业点构成的多边形区域
///
/// 作业点顺序由调用方给定，决定面积与形心计算时的环序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    elevations: Vec<Handle>,
    /// 显示编号
    pub number: u32,
    /// 关联的填充（阴影）标记
    pub hatch: Handle,
}

impl Figure {
    /// 创建图形，至少需要3个作业点
    pub fn new(elevations: Vec<Handle>, number: u32, hatch: Handle) -> GeoResult<Self> {
        if elevations.len() < 3 {
            return Err(GeoError::invalid_geometry(format!(
                "A figure needs at least 3 elevations, got {}",
                elevations.len()
            )));
        }

        Ok(Self {
            elevations,
            number,
            hatch,
        })
    }

    /// 成员作业点句柄（环序）
    pub fn elevations(&self) -> &[Handle] {
        &self.elevations
    }

    pub fn contains_elevation(&self, handle: &Handle) -> bool {
        self.elevations.contains(handle)
    }
}

/// 图形在一致性维护中的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureState {
    /// 一致且同号，可直接统计土方量
    ValidSingle,
    /// 一致但填挖混合或含零点
    ValidMixed,
    /// 引用的作业点已不存在
    Destroyed,
}

/// 图形的派生快照，按需计算，从不持久化
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FigureData {
    /// 平均施工高度（米）
    pub average_elevation: f64,
    pub area: f64,
    /// 不混合正负且不含零点
    pub single_figure: bool,
    pub destroyed: bool,
}

impl FigureData {
    /// 一个已损坏图形的快照
    pub fn destroyed() -> Self {
        Self {
            destroyed: true,
            ..Default::default()
        }
    }

    pub fn volume(&self) -> f64 {
        self.area * self.average_elevation
    }

    /// 平均施工高度（厘米）
    pub fn average_elevation_cm(&self) -> f64 {
        self.average_elevation * 100.0
    }

    pub fn state(&self) -> FigureState {
        if self.destroyed {
            FigureState::Destroyed
        } else if self.single_figure {
            FigureState::ValidSingle
        } else {
            FigureState::ValidMixed
        }
    }
}

/// 创建图形前的校验结果
#[derive(Debug, Clone, PartialEq)]
pub struct FigurePlan {
    /// 多边形环（x=东，y=北）
    pub ring: Vec<Point2>,
    pub area: f64,
    pub average_elevation: f64,
    /// 标注位置
    pub centroid: Option<Point2>,
}

impl FigurePlan {
    pub fn volume(&self) -> f64 {
        self.area * self.average_elevation
    }

    pub fn is_fill(&self) -> bool {
        self.average_elevation >= 0.0
    }
}
