//! 零线绘制
//!
//! 沿闭合导线（`z` 为施工高度）求出全部零点，用虚线把零点依次连接，
//! 并在顶点和零点处标注施工高度（厘米）。

use crate::error::{CommandError, CommandResult, OrCancelled};
use crate::session::{Services, Session};
use cartogram_core::geometry::{close_ring, zero_crossings_along, zero_line_segments};
use cartogram_core::handle::Handle;
use cartogram_core::math::Point3;
use cartogram_core::registry::GeoRegistry;
use cartogram_core::services::{MarkerGeometry, MarkerKind};

/// 零线绘制结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ZeroLineSummary {
    pub crossings: Vec<Point3>,
    pub lines: usize,
    pub texts: usize,
}

/// 按选择顺序取登记的作业点作为导线顶点
pub fn traversal_from_selection(registry: &GeoRegistry, selection: &[Handle]) -> Vec<Point3> {
    selection
        .iter()
        .filter_map(|handle| registry.elevation(handle))
        .map(|elevation| elevation.work_point())
        .collect()
}

/// 以所选作业点为导线绘制零线
pub fn draw_selected_zero_lines(
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<ZeroLineSummary> {
    let selection = services
        .prompt
        .select_markers("Select traversal elevations in order: ")
        .or_cancelled()?;
    let vertices = traversal_from_selection(&session.registry, &selection);

    draw_zero_elevation_lines(session, services, &vertices)
}

/// 绘制导线的零线与施工高度文字
pub fn draw_zero_elevation_lines(
    session: &Session,
    services: &mut Services<'_>,
    vertices: &[Point3],
) -> CommandResult<ZeroLineSummary> {
    if vertices.len() < 2 {
        return Err(CommandError::invalid_selection(
            "A traversal needs at least 2 vertices",
        ));
    }

    let config = &session.config;
    let ring = close_ring(vertices);
    let crossings = zero_crossings_along(&ring);
    let mut summary = ZeroLineSummary::default();

    for (start, end) in zero_line_segments(&crossings) {
        let line = MarkerGeometry::Line {
            start,
            end,
            color: config.zero_line_color,
        };
        if services.markers.create_marker(MarkerKind::ZeroLine, line).is_none() {
            return Err(abort(services, &summary, "zero line"));
        }
        summary.lines += 1;
    }

    let labelled = vertices
        .iter()
        .filter(|vertex| vertex.z != 0.0)
        .chain(crossings.iter());

    for point in labelled {
        let text = MarkerGeometry::Text {
            position: *point,
            content: format!("{:.0}", point.z * 100.0),
            height: config.scaled_text_height(),
            color: config.zero_line_color,
        };
        if services.markers.create_marker(MarkerKind::WorkText, text).is_none() {
            return Err(abort(services, &summary, "work value text"));
        }
        summary.texts += 1;
    }

    tracing::info!(
        "Drew {} zero lines through {} crossings",
        summary.lines,
        crossings.len()
    );

    summary.crossings = crossings;
    Ok(summary)
}

/// 中途失败时报告已绘制的数量
fn abort(services: &mut Services<'_>, summary: &ZeroLineSummary, what: &str) -> CommandError {
    services.report(format!(
        "Cannot draw {what}, {} zero lines and {} texts drawn",
        summary.lines, summary.texts
    ));
    CommandError::marker_failed(what)
}
