//! 几何内核
//!
//! 纯函数的多边形与线段计算：
//! - 多边形面积（鞋带公式）
//! - 多边形形心
//! - 三维线段上的零点（施工高度为零的位置）
//! - 零线的连线与方向判断

use crate::error::{GeoError, GeoResult};
use crate::math::{Point2, Point3, EPSILON};

/// 闭合环上的边（最后一点连回第一点）
fn ring_edges(points: &[Point2]) -> impl Iterator<Item = (&Point2, &Point2)> {
    points.iter().zip(points.iter().cycle().skip(1))
}

/// 单条边的鞋带项 xᵢ·yᵢ₊₁ − xᵢ₊₁·yᵢ
fn cross_term(a: &Point2, b: &Point2) -> f64 {
    a.x * b.y - b.x * a.y
}

/// 计算多边形面积
///
/// 点序列视为闭合环，顺时针与逆时针结果相同。至少需要3个点。
pub fn polygon_area(points: &[Point2]) -> GeoResult<f64> {
    if points.len() < 3 {
        return Err(GeoError::invalid_geometry(format!(
            "Cannot get area of {} points, at least 3 required",
            points.len()
        )));
    }

    let sum: f64 = ring_edges(points).map(|(a, b)| cross_term(a, b)).sum();

    Ok((sum * 0.5).abs())
}

/// 计算多边形形心
///
/// 少于3个点或面积为零时返回 `None`。
/// 计算前把点平移到最小坐标处以保证数值稳定，平移只作用于局部副本，不修改输入。
pub fn polygon_centroid(points: &[Point2]) -> Option<Point2> {
    if points.len() < 3 {
        return None;
    }

    let reduction_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let reduction_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);

    let local: Vec<Point2> = points
        .iter()
        .map(|p| Point2::new(p.x - reduction_x, p.y - reduction_y))
        .collect();

    let mut sx = 0.0;
    let mut sy = 0.0;
    let mut area = 0.0;

    for (a, b) in ring_edges(&local) {
        let term = cross_term(a, b);
        sx += (a.x + b.x) * term;
        sy += (a.y + b.y) * term;
        area += term;
    }

    area /= 2.0;

    if area.abs() < EPSILON {
        return None;
    }

    Some(Point2::new(
        sx / (6.0 * area) + reduction_x,
        sy / (6.0 * area) + reduction_y,
    ))
}

/// 点相对于有向直线的位置
///
/// 返回叉积：正值在左侧，负值在右侧，零表示共线。
pub fn side_of_line(line_start: &Point2, line_end: &Point2, point: &Point2) -> f64 {
    (line_end.x - line_start.x) * (point.y - line_start.y)
        - (line_end.y - line_start.y) * (point.x - line_start.x)
}

/// 查找三维线段上的零点
///
/// 端点的 `z` 为施工高度。端点 `z` 恰为0时该端点本身即零点；
/// 两端异号时沿线段线性插值求出零点（即三维线段与其地面投影的交点）；
/// 同号时没有零点。两端都为0时整条线段落在零平面上，返回两个端点。
pub fn find_zero_crossing(start: &Point3, end: &Point3) -> Vec<Point3> {
    if start.z.is_nan() || end.z.is_nan() {
        return Vec::new();
    }

    match (start.z == 0.0, end.z == 0.0) {
        (true, true) => vec![*start, *end],
        (true, false) => vec![*start],
        (false, true) => vec![*end],
        (false, false) => {
            if (start.z > 0.0) == (end.z > 0.0) {
                return Vec::new();
            }

            let t = start.z / (start.z - end.z);
            vec![Point3::new(
                start.x + (end.x - start.x) * t,
                start.y + (end.y - start.y) * t,
                0.0,
            )]
        }
    }
}

/// 沿折线收集全部零点，跳过完全重复的点
pub fn zero_crossings_along(vertices: &[Point3]) -> Vec<Point3> {
    let mut crossings: Vec<Point3> = Vec::new();

    for pair in vertices.windows(2) {
        for point in find_zero_crossing(&pair[0], &pair[1]) {
            if !crossings.contains(&point) {
                crossings.push(point);
            }
        }
    }

    crossings
}

/// 闭合顶点环：在末尾重复第一个顶点
pub fn close_ring(vertices: &[Point3]) -> Vec<Point3> {
    let mut ring = vertices.to_vec();
    if let Some(first) = vertices.first() {
        ring.push(*first);
    }
    ring
}

/// 由零点生成零线线段
///
/// 两个点生成一条线段；三个及以上按顺序连接并闭合回第一点；更少则没有线段。
pub fn zero_line_segments(points: &[Point3]) -> Vec<(Point3, Point3)> {
    match points.len() {
        0 | 1 => Vec::new(),
        2 => vec![(points[0], points[1])],
        n => {
            let mut segments: Vec<(Point3, Point3)> =
                points.windows(2).map(|pair| (pair[0], pair[1])).collect();
            segments.push((points[n - 1], points[0]));
            segments
        }
    }
}
