//! 作业点命令：插入、删除、按曲面重算、插值零点

use crate::error::{CommandError, CommandResult, OrCancelled};
use crate::maintenance::update_figures;
use crate::session::{Services, Session};
use cartogram_core::elevation::Elevation;
use cartogram_core::error::GeoError;
use cartogram_core::geometry::find_zero_crossing;
use cartogram_core::handle::Handle;
use cartogram_core::math::{Point2, Position};
use cartogram_core::services::{elevation_attributes, tags, MarkerGeometry, MarkerKind};

/// 重算时取样的曲面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    Existing,
    Design,
}

impl SurfaceRole {
    /// 提示中的编号：1 原地面，2 设计面
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(SurfaceRole::Existing),
            2 => Some(SurfaceRole::Design),
            _ => None,
        }
    }

    /// 对应的块属性标签
    pub fn tag(&self) -> &'static str {
        match self {
            SurfaceRole::Existing => tags::EG_ELEV,
            SurfaceRole::Design => tags::DESIGN_ELEV_TOP,
        }
    }
}

fn sample(services: &Services<'_>, surface: &Handle, point: &Point2) -> CommandResult<f64> {
    services
        .surfaces
        .sample_elevation(surface, point.x, point.y)
        .ok_or_else(|| CommandError::SurfaceSample {
            surface: surface.clone(),
            x: point.x,
            y: point.y,
        })
}

/// 登记新作业点，失败时删除刚创建的标记
fn register(
    session: &mut Session,
    services: &mut Services<'_>,
    handle: &Handle,
    elevation: Elevation,
) -> CommandResult<()> {
    session
        .registry
        .add_elevation(handle.clone(), elevation)
        .map_err(|err| {
            services.markers.erase_marker(handle);
            err.into()
        })
}

/// 逐点插入作业点，直到用户结束拾取
pub fn insert_elevations(
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<Vec<Handle>> {
    let existing_surface = services
        .prompt
        .select_surface("Select existing ground surface: ")
        .or_cancelled()?;
    let design_surface = services
        .prompt
        .select_surface("Select design surface: ")
        .or_cancelled()?;

    let thickness = services
        .prompt
        .prompt_number("Pavement thickness: ", 0.0)
        .or_cancelled()?;
    if !(thickness.is_finite() && thickness >= 0.0) {
        return Err(GeoError::InvalidParameter(format!(
            "Pavement thickness must not be negative, got {thickness}"
        ))
        .into());
    }

    let mut inserted = Vec::new();

    while let Some(point) = services.prompt.prompt_point("Pick elevation point: ") {
        let sampled = sample(services, &existing_surface, &point)
            .and_then(|existing| Ok((existing, sample(services, &design_surface, &point)?)));
        let (existing, design) = match sampled {
            Ok(values) => values,
            Err(err) => {
                services.report(format!(
                    "Point is outside the surface, {} elevations inserted",
                    inserted.len()
                ));
                return Err(err);
            }
        };
        let elevation = Elevation::new(Position::from_point2(point), existing, design, thickness);

        let geometry = MarkerGeometry::Block {
            position: point,
            scale: session.config.scale_factor,
            attributes: elevation_attributes(&elevation),
        };
        let Some(handle) = services.markers.create_marker(MarkerKind::Elevation, geometry) else {
            services.report(format!(
                "Cannot insert block, {} elevations inserted",
                inserted.len()
            ));
            return Err(CommandError::marker_failed("elevation block"));
        };

        let work = elevation.value();
        if let Err(err) = register(session, services, &handle, elevation) {
            services.report(format!(
                "Cannot register block {handle}, {} elevations inserted",
                inserted.len()
            ));
            return Err(err);
        }
        tracing::debug!("Inserted elevation {} (work {:.3})", handle, work);
        inserted.push(handle);
    }

    tracing::info!("Inserted {} elevations", inserted.len());
    Ok(inserted)
}

/// 删除所选作业点，并维护引用它们的图形
pub fn remove_elevations(
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<Vec<Handle>> {
    let selection = services
        .prompt
        .select_markers("Select elevations to remove: ")
        .or_cancelled()?;

    let mut removed = Vec::new();
    let mut failure = None;

    for handle in selection {
        if !session.registry.contains_elevation(&handle) {
            continue;
        }
        if !services.markers.erase_marker(&handle) {
            failure = Some(handle);
            break;
        }

        session.registry.remove_elevation(&handle);
        services.report(format!("Block ({handle}) was erased"));
        removed.push(handle);
    }

    update_figures(&mut session.registry, services, &removed)?;

    match failure {
        Some(handle) => {
            services.report(format!(
                "Cannot erase {handle}, {} elevations removed",
                removed.len()
            ));
            Err(CommandError::marker_failed(format!("erase {handle}")))
        }
        None => Ok(removed),
    }
}

/// 按曲面重新取样所选作业点的原地面或设计高程
///
/// 零点、未登记的标记和曲面外的点跳过并提示。
pub fn resample_elevations(
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<Vec<Handle>> {
    let code = services
        .prompt
        .prompt_integer("Surface type [1-Existing 2-Design]: ", 0)
        .or_cancelled()?;
    let role = SurfaceRole::from_code(code).ok_or_else(|| {
        GeoError::InvalidParameter(format!("Invalid surface type {code}"))
    })?;

    let surface = services.prompt.select_surface("Select surface: ").or_cancelled()?;
    let selection = services
        .prompt
        .select_markers("Select elevations: ")
        .or_cancelled()?;

    let mut modified = Vec::new();

    for handle in selection {
        let Some(elevation) = session.registry.elevation_mut(&handle) else {
            services.report(format!("No data for block {handle}, skipped"));
            continue;
        };
        if elevation.zero_point {
            services.report(format!("Cannot resample zero point {handle}, skipped"));
            continue;
        }

        let point = elevation.position.to_point2();
        let Some(value) = services.surfaces.sample_elevation(&surface, point.x, point.y) else {
            services.report(format!("Block {handle} is outside the surface, skipped"));
            continue;
        };

        match role {
            SurfaceRole::Existing => elevation.existing_elevation = value,
            SurfaceRole::Design => elevation.design_elevation = value,
        }
        let cut_fill = format!("{:.0}", elevation.work_value_cm());

        services.markers.set_attribute(&handle, role.tag(), &format!("{value:.4}"));
        services.markers.set_attribute(&handle, tags::CUT_FILL, &cut_fill);
        modified.push(handle);
    }

    update_figures(&mut session.registry, services, &modified)?;

    tracing::info!("Resampled {} elevations", modified.len());
    Ok(modified)
}

/// 在两个作业点之间插值出零点并插入
pub fn interpolate_zero_point(
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<Handle> {
    let selection = services
        .prompt
        .select_markers("Select two elevations to interpolate: ")
        .or_cancelled()?;

    if selection.len() != 2 {
        return Err(CommandError::invalid_selection("Select exactly two elevations"));
    }

    let points: Vec<_> = selection
        .iter()
        .filter_map(|handle| session.registry.elevation(handle))
        .map(Elevation::work_point)
        .collect();
    let [start, end] = points.as_slice() else {
        return Err(CommandError::invalid_selection("Select exactly two elevations"));
    };

    let crossing = match find_zero_crossing(start, end).as_slice() {
        [point] => *point,
        [] => {
            return Err(CommandError::invalid_selection(
                "Both elevations are on the same side of zero",
            ))
        }
        _ => {
            return Err(CommandError::invalid_selection(
                "Both elevations are zero, the segment lies on the zero plane",
            ))
        }
    };

    let position = Position::from_point2(Point2::new(crossing.x, crossing.y));
    let elevation = Elevation::zero_point(position);
    let geometry = MarkerGeometry::Block {
        position: position.to_point2(),
        scale: session.config.scale_factor,
        attributes: elevation_attributes(&elevation),
    };

    let handle = services
        .markers
        .create_marker(MarkerKind::Elevation, geometry)
        .ok_or_else(|| CommandError::marker_failed("zero point block"))?;
    register(session, services, &handle, elevation)?;

    tracing::info!("Inserted zero point {} at ({:.3}, {:.3})", handle, crossing.x, crossing.y);
    Ok(handle)
}
