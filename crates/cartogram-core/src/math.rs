//! 数学基础类型
//!
//! 平面坐标约定：`x` 为东坐标（Easting），`y` 为北坐标（Northing）。
//! 三维点的 `z` 在零线计算中表示施工高度，而不是真实高程。

use serde::{Deserialize, Serialize};

pub type Point2 = nalgebra::Point2<f64>;
pub type Point3 = nalgebra::Point3<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;

/// 浮点比较容差
pub const EPSILON: f64 = 1e-10;

/// 测量坐标（北坐标、东坐标）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub northing: f64,
    pub easting: f64,
}

impl Position {
    pub fn new(northing: f64, easting: f64) -> Self {
        Self { northing, easting }
    }

    /// 从平面点创建（x=东，y=北）
    pub fn from_point2(point: Point2) -> Self {
        Self {
            northing: point.y,
            easting: point.x,
        }
    }

    /// 转换为平面点（x=东，y=北）
    pub fn to_point2(&self) -> Point2 {
        Point2::new(self.easting, self.northing)
    }

    /// 以给定的z值转换为三维点
    pub fn to_point3(&self, z: f64) -> Point3 {
        Point3::new(self.easting, self.northing, z)
    }
}
