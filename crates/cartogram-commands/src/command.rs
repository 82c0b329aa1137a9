//! 命令类型

/// 土方设计命令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    // 作业点
    InsertElevation,
    RemoveElevation,
    ResampleElevation,
    InterpolateZeroPoint,

    // 图形
    CreateFigure,
    RemoveFigure,
    RenumberFigures,
    SetNextFigureNumber,

    // 统计与绘图
    VolumeReport,
    DrawZeroLines,

    // 数据
    Synchronize,
    ImportData,
    ExportData,

    // 比例
    GetScale,
    SetScale,
}

impl CommandType {
    /// 全部命令
    pub const ALL: [CommandType; 15] = [
        CommandType::InsertElevation,
        CommandType::RemoveElevation,
        CommandType::ResampleElevation,
        CommandType::InterpolateZeroPoint,
        CommandType::CreateFigure,
        CommandType::RemoveFigure,
        CommandType::RenumberFigures,
        CommandType::SetNextFigureNumber,
        CommandType::VolumeReport,
        CommandType::DrawZeroLines,
        CommandType::Synchronize,
        CommandType::ImportData,
        CommandType::ExportData,
        CommandType::GetScale,
        CommandType::SetScale,
    ];

    /// 获取命令的显示名称
    pub fn name(&self) -> &'static str {
        match self {
            CommandType::InsertElevation => "Insert Elevation",
            CommandType::RemoveElevation => "Remove Elevation",
            CommandType::ResampleElevation => "Elevation From Surface",
            CommandType::InterpolateZeroPoint => "Zero Point",
            CommandType::CreateFigure => "Create Figure",
            CommandType::RemoveFigure => "Remove Figure",
            CommandType::RenumberFigures => "Renumber Figures",
            CommandType::SetNextFigureNumber => "Next Figure Number",
            CommandType::VolumeReport => "Volume Report",
            CommandType::DrawZeroLines => "Zero Elevation Lines",
            CommandType::Synchronize => "Synchronize Data",
            CommandType::ImportData => "Import Data",
            CommandType::ExportData => "Export Data",
            CommandType::GetScale => "Get Scale",
            CommandType::SetScale => "Set Scale",
        }
    }

    /// 命令行中输入的完整命令
    pub fn command(&self) -> &'static str {
        match self {
            CommandType::InsertElevation => "CG_INSERTELEVATION",
            CommandType::RemoveElevation => "CG_REMOVEELEVATION",
            CommandType::ResampleElevation => "CG_CALCULATEELEVATIONFROMSURFACE",
            CommandType::InterpolateZeroPoint => "CG_GETZEROPOINT",
            CommandType::CreateFigure => "CG_CREATEFIGURE",
            CommandType::RemoveFigure => "CG_REMOVEFIGURE",
            CommandType::RenumberFigures => "CG_RENUMBERFIGURES",
            CommandType::SetNextFigureNumber => "CG_SETNEXTFIGURENUMBER",
            CommandType::VolumeReport => "CG_GETVOLUMEREPORT",
            CommandType::DrawZeroLines => "VD_CARTOGRAMDRAWZEROELEVATIONLINES",
            CommandType::Synchronize => "CG_SYNCHRONIZEDATA",
            CommandType::ImportData => "CG_IMPORTDATA",
            CommandType::ExportData => "CG_EXPORTDATA",
            CommandType::GetScale => "CG_GETSCALE",
            CommandType::SetScale => "CG_SETSCALE",
        }
    }

    /// 短命令
    pub fn shortcuts(&self) -> &'static [&'static str] {
        match self {
            CommandType::InsertElevation => &["IE", "CGI"],
            CommandType::RemoveElevation => &["RE"],
            CommandType::ResampleElevation => &["CE"],
            CommandType::InterpolateZeroPoint => &["ZP"],
            CommandType::CreateFigure => &["CF", "FIG"],
            CommandType::RemoveFigure => &["RF"],
            CommandType::RenumberFigures => &["NF"],
            CommandType::SetNextFigureNumber => &["SN"],
            CommandType::VolumeReport => &["VR", "VOL"],
            CommandType::DrawZeroLines => &["ZL"],
            CommandType::Synchronize => &["SY"],
            CommandType::ImportData => &["IM"],
            CommandType::ExportData => &["EX"],
            CommandType::GetScale => &["GS"],
            CommandType::SetScale => &["SS"],
        }
    }
}
