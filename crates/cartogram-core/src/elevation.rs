//! 作业点（施工高度点）

use crate::math::{Point3, Position};
use serde::{Deserialize, Serialize};

/// 作业点
///
/// 施工高度 = 设计高程 − 面层厚度 − 原地面高程，正值为填方，负值为挖方。
/// 施工高度总是由三个高程现算，不单独存储。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Elevation {
    pub position: Position,
    /// 原地面高程
    pub existing_elevation: f64,
    /// 设计高程
    pub design_elevation: f64,
    /// 面层（路面）厚度
    pub ground: f64,
    /// 插值得到的零点，而非实测点
    pub zero_point: bool,
}

impl Elevation {
    pub fn new(
        position: Position,
        existing_elevation: f64,
        design_elevation: f64,
        ground: f64,
    ) -> Self {
        Self {
            position,
            existing_elevation,
            design_elevation,
            ground,
            zero_point: false,
        }
    }

    /// 创建零点（各高程均为0）
    pub fn zero_point(position: Position) -> Self {
        Self {
            position,
            zero_point: true,
            ..Default::default()
        }
    }

    /// 施工高度（米）
    pub fn value(&self) -> f64 {
        self.design_elevation - self.ground - self.existing_elevation
    }

    /// 施工高度（厘米），用于标注
    pub fn work_value_cm(&self) -> f64 {
        self.value() * 100.0
    }

    pub fn is_fill(&self) -> bool {
        self.value() > 0.0
    }

    pub fn is_cut(&self) -> bool {
        self.value() < 0.0
    }

    /// 以施工高度为z值的三维点
    pub fn work_point(&self) -> Point3 {
        self.position.to_point3(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;

    #[test]
    fn test_value_is_derived() {
        let mut elevation = Elevation::new(Position::new(0.0, 0.0), 101.25, 101.80, 0.25);
        assert!((elevation.value() - 0.30).abs() < 1e-9);
        assert!(elevation.is_fill());

        elevation.existing_elevation = 102.0;
        assert!((elevation.value() + 0.45).abs() < 1e-9);
        assert!(elevation.is_cut());
        assert!((elevation.work_value_cm() + 45.0).abs() < 1e-7);
    }

    #[test]
    fn test_zero_point() {
        let elevation = Elevation::zero_point(Position::new(12.0, 7.0));
        assert!(elevation.zero_point);
        assert!(elevation.value().abs() < EPSILON);
        assert!(!elevation.is_fill() && !elevation.is_cut());
        assert_eq!(elevation.work_point(), Point3::new(7.0, 12.0, 0.0));
    }
}
