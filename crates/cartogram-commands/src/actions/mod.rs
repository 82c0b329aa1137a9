//! 具体的命令实现
//!
//! 每个命令是一个接收会话和协作者的函数

pub mod data;
pub mod elevation;
pub mod figure;
pub mod scale;
pub mod sync;
pub mod volume;
pub mod zero_line;

pub use data::{export_data, import_data};
pub use elevation::{
    insert_elevations, interpolate_zero_point, remove_elevations, resample_elevations, SurfaceRole,
};
pub use figure::{create_figure, remove_figures, renumber_figures, set_next_figure_number};
pub use scale::{get_scale, set_scale};
pub use sync::{synchronize, SyncSummary};
pub use volume::volume_report;
pub use zero_line::{
    draw_selected_zero_lines, draw_zero_elevation_lines, traversal_from_selection, ZeroLineSummary,
};

use crate::command::CommandType;
use crate::error::CommandResult;
use crate::session::{Services, Session};

/// 执行指定类型的命令
pub fn execute(
    command: CommandType,
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<()> {
    tracing::debug!("Executing {}", command.name());

    match command {
        CommandType::InsertElevation => insert_elevations(session, services).map(drop),
        CommandType::RemoveElevation => remove_elevations(session, services).map(drop),
        CommandType::ResampleElevation => resample_elevations(session, services).map(drop),
        CommandType::InterpolateZeroPoint => interpolate_zero_point(session, services).map(drop),
        CommandType::CreateFigure => create_figure(session, services).map(drop),
        CommandType::RemoveFigure => remove_figures(session, services).map(drop),
        CommandType::RenumberFigures => renumber_figures(session, services).map(drop),
        CommandType::SetNextFigureNumber => set_next_figure_number(session, services).map(drop),
        CommandType::VolumeReport => volume_report(session, services).map(drop),
        CommandType::DrawZeroLines => draw_selected_zero_lines(session, services).map(drop),
        CommandType::Synchronize => synchronize(session, services).map(drop),
        CommandType::ImportData => import_data(session, services).map(drop),
        CommandType::ExportData => export_data(session, services).map(drop),
        CommandType::GetScale => get_scale(session, services).map(drop),
        CommandType::SetScale => set_scale(session, services).map(drop),
    }
}
