//! 作业点变化后的图形维护
//!
//! 删除或修改作业点后，受影响的图形要么刷新标注，
//! 要么随标注和填充一起删除。

use crate::error::CommandResult;
use crate::session::Services;
use cartogram_core::handle::Handle;
use cartogram_core::registry::GeoRegistry;
use cartogram_core::services::tags;

/// 更新包含给定作业点的全部图形，返回删除的图形数
///
/// 图形已损坏或不再同号时删除其标记、填充和登记；
/// 否则刷新 `VOL` 和 `AVG`，标注块缺失时提示。
pub fn update_figures(
    registry: &mut GeoRegistry,
    services: &mut Services<'_>,
    changed_elevations: &[Handle],
) -> CommandResult<usize> {
    let mut erased = 0;

    for figure_handle in registry.affected_figures(changed_elevations) {
        let data = registry.figure_data(&figure_handle)?;

        if !data.destroyed && data.single_figure {
            let volume = format!("{:.0}", data.volume());
            let average = format!("{:.0}", data.average_elevation_cm());
            let refreshed = services.markers.set_attribute(&figure_handle, tags::VOL, &volume)
                & services.markers.set_attribute(&figure_handle, tags::AVG, &average);

            if refreshed {
                tracing::debug!("Refreshed figure {}", figure_handle);
            } else {
                tracing::warn!("Figure marker {} cannot be updated", figure_handle);
                services.report(format!("Cannot update figure {figure_handle}"));
            }
            continue;
        }

        if let Some(figure) = registry.remove_figure(&figure_handle) {
            if !services.markers.erase_marker(&figure.hatch) {
                tracing::warn!(
                    "Hatch {} of figure {} was already gone",
                    figure.hatch,
                    figure_handle
                );
            }
            if !services.markers.erase_marker(&figure_handle) {
                tracing::warn!("Figure marker {} was already gone", figure_handle);
            }
            erased += 1;
        }
    }

    if erased > 0 {
        services.report(format!("Warning: {erased} figures were erased"));
    }

    Ok(erased)
}
