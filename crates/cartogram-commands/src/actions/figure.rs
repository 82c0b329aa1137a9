//! 图形命令：创建、删除、重新编号、设置下一个编号

use crate::error::{CommandError, CommandResult, OrCancelled};
use crate::session::{Services, Session};
use cartogram_core::error::GeoError;
use cartogram_core::figure::{Figure, FigurePlan};
use cartogram_core::handle::Handle;
use cartogram_core::math::Point2;
use cartogram_core::services::{figure_attributes, tags, MarkerGeometry, MarkerKind};

/// 由所选作业点创建图形
///
/// 选择顺序即多边形环序。先校验并取得编号，再创建填充和标注块；
/// 任何一步失败都会删除已创建的标记并恢复编号，注册表不变。
pub fn create_figure(session: &mut Session, services: &mut Services<'_>) -> CommandResult<Handle> {
    let selection = services
        .prompt
        .select_markers("Select elevations for the figure: ")
        .or_cancelled()?;

    let members: Vec<Handle> = selection
        .into_iter()
        .filter(|handle| session.registry.contains_elevation(handle))
        .collect();

    let plan = session.registry.plan_figure(&members)?;
    let centroid = plan
        .centroid
        .ok_or_else(|| GeoError::invalid_geometry("Figure boundary has zero area"))?;

    let number = session.registry.allocate_figure_number()?;
    let figure_handle = place_figure(session, services, members, &plan, centroid, number)
        .inspect_err(|_| session.registry.set_next_figure_number(number))?;

    tracing::info!(
        "Created figure {} ({}): area {:.2}, volume {:.2}",
        number,
        figure_handle,
        plan.area,
        plan.volume()
    );

    Ok(figure_handle)
}

fn place_figure(
    session: &mut Session,
    services: &mut Services<'_>,
    members: Vec<Handle>,
    plan: &FigurePlan,
    centroid: Point2,
    number: u32,
) -> CommandResult<Handle> {
    let config = &session.config;
    let hatch = MarkerGeometry::Hatch {
        boundary: plan.ring.clone(),
        color: config.hatch_color(plan.average_elevation),
        pattern: config.hatch_pattern.clone(),
        scale: config.scale_factor,
    };
    let hatch_handle = services
        .markers
        .create_marker(MarkerKind::Hatch, hatch)
        .ok_or_else(|| CommandError::marker_failed("figure hatch"))?;

    let block = MarkerGeometry::Block {
        position: centroid,
        scale: config.scale_factor,
        attributes: figure_attributes(
            number,
            plan.area,
            plan.average_elevation * 100.0,
            plan.volume(),
        ),
    };
    let Some(figure_handle) = services.markers.create_marker(MarkerKind::Figure, block) else {
        services.markers.erase_marker(&hatch_handle);
        return Err(CommandError::marker_failed("figure block"));
    };

    let registered = Figure::new(members, number, hatch_handle.clone())
        .and_then(|figure| session.registry.add_figure(figure_handle.clone(), figure));
    if let Err(err) = registered {
        services.markers.erase_marker(&figure_handle);
        services.markers.erase_marker(&hatch_handle);
        services.report(format!("Cannot register figure {figure_handle}: {err}"));
        return Err(err.into());
    }

    Ok(figure_handle)
}

/// 删除所选图形及其填充
pub fn remove_figures(session: &mut Session, services: &mut Services<'_>) -> CommandResult<usize> {
    let selection = services
        .prompt
        .select_markers("Select figures to remove: ")
        .or_cancelled()?;

    let mut removed = 0;

    for handle in selection {
        let Some(hatch) = session.registry.figure(&handle).map(|f| f.hatch.clone()) else {
            continue;
        };

        if !services.markers.erase_marker(&handle) {
            services.report(format!("Cannot erase {handle}, {removed} figures removed"));
            return Err(CommandError::marker_failed(format!("erase {handle}")));
        }
        if !services.markers.erase_marker(&hatch) {
            tracing::warn!("Hatch {} of figure {} was already gone", hatch, handle);
        }

        session.registry.remove_figure(&handle);
        services.report(format!("Block ({handle}) was erased"));
        removed += 1;
    }

    Ok(removed)
}

/// 按选择顺序把图形重新编号为 1..n，下一个编号设为 n+1
pub fn renumber_figures(session: &mut Session, services: &mut Services<'_>) -> CommandResult<u32> {
    let selection = services
        .prompt
        .select_markers("Select figures to renumber: ")
        .or_cancelled()?;

    let mut count: u32 = 0;

    for handle in selection {
        if services.markers.marker_kind(&handle) != Some(MarkerKind::Figure) {
            continue;
        }

        count += 1;
        let text = count.to_string();
        services.markers.set_attribute(&handle, tags::NMB, &text);
        services.markers.set_attribute(&handle, tags::NMB_V, &text);

        if let Some(figure) = session.registry.figure_mut(&handle) {
            figure.number = count;
        }
    }

    session.registry.set_next_figure_number(count + 1);
    services.report(format!("Renumbered figures: {count}"));
    Ok(count)
}

/// 设置下一个图形编号
pub fn set_next_figure_number(
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<u32> {
    let current = session.registry.next_figure_number();
    let value = services
        .prompt
        .prompt_integer("Next figure number: ", i64::from(current))
        .or_cancelled()?;

    let number = u32::try_from(value).map_err(|_| {
        GeoError::InvalidParameter(format!(
            "Figure number must be a non-negative integer, got {value}"
        ))
    })?;

    session.registry.set_next_figure_number(number);
    tracing::info!("Next figure number set to {}", number);
    Ok(number)
}
