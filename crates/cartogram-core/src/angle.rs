//! 角度计算（百分度制）
//!
//! 测量中使用百分度（gon），整圆为400。方位角从北方向顺时针量取。

use crate::error::{GeoError, GeoResult};
use crate::geometry::side_of_line;
use crate::math::{Point2, EPSILON};
use std::f64::consts::PI;

/// 整圆的百分度数
pub const FULL_CIRCLE: f64 = 400.0;

/// 平角的百分度数
pub const STRAIGHT_ANGLE: f64 = 200.0;

pub fn gradians_to_radians(gradians: f64) -> f64 {
    gradians * (PI / 200.0)
}

pub fn radians_to_gradians(radians: f64) -> f64 {
    radians * (200.0 / PI)
}

/// 从 `from` 到 `to` 的方位角，范围 [0, 400)
pub fn heading(from: &Point2, to: &Point2) -> GeoResult<f64> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    if dx.abs() < EPSILON && dy.abs() < EPSILON {
        return Err(GeoError::degenerate_angle(
            "Cannot get heading between coincident points",
        ));
    }

    let gradians = radians_to_gradians(dx.atan2(dy));
    Ok(if gradians < 0.0 {
        gradians + FULL_CIRCLE
    } else {
        gradians
    })
}

/// 由后视、前视方位角计算折角
///
/// `side` 为转向判断的叉积符号。两方位角相等（或 `side` 为零）时无法确定。
pub fn polygon_angle(backsight_heading: f64, foresight_heading: f64, side: f64) -> GeoResult<f64> {
    let back = backsight_heading;
    let fore = foresight_heading;

    if back > fore && side < 0.0 {
        Ok(back - fore)
    } else if back > fore && side > 0.0 {
        Ok(FULL_CIRCLE - back + fore)
    } else if back < fore && side > 0.0 {
        Ok(fore - back)
    } else if back < fore && side < 0.0 {
        // back < fore 时差值必为负
        Ok(back - fore + FULL_CIRCLE)
    } else {
        Err(GeoError::degenerate_angle(format!(
            "Cannot get polygon angle (backsight {back}, foresight {fore}, side {side})"
        )))
    }
}

/// 坡线符号的旋转角
///
/// 取折角的角平分方向，`slope_side` 决定坡线位于哪一侧。折角恰为200时平分线不确定。
pub fn slope_line_rotation_angle(polygon_angle: f64, slope_side: f64) -> GeoResult<f64> {
    let angle = polygon_angle;

    if angle < STRAIGHT_ANGLE && slope_side < 0.0 {
        Ok(STRAIGHT_ANGLE - angle + angle / 2.0)
    } else if angle < STRAIGHT_ANGLE && slope_side > 0.0 {
        Ok(angle / 2.0)
    } else if angle > STRAIGHT_ANGLE && slope_side < 0.0 {
        Ok(100.0 - (angle - STRAIGHT_ANGLE) / 2.0)
    } else if angle > STRAIGHT_ANGLE && slope_side > 0.0 {
        Ok(100.0 + (angle - STRAIGHT_ANGLE) / 2.0)
    } else {
        Err(GeoError::degenerate_angle(format!(
            "Cannot get slope line rotation (polygon angle {angle}, slope side {slope_side})"
        )))
    }
}

/// 在测站处由后视点、前视点求坡线符号的旋转角
pub fn slope_marker_rotation(
    backsight: &Point2,
    station: &Point2,
    foresight: &Point2,
    slope_side: f64,
) -> GeoResult<f64> {
    let back = heading(station, backsight)?;
    let fore = heading(station, foresight)?;
    let side = side_of_line(backsight, station, foresight);

    let angle = polygon_angle(back, fore, side)?;
    slope_line_rotation_angle(angle, slope_side)
}
