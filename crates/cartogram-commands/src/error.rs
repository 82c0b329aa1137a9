//! 命令错误定义

use cartogram_core::error::GeoError;
use cartogram_core::handle::Handle;
use cartogram_file::FileError;
use thiserror::Error;

/// 命令执行的结果类型
pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command cancelled")]
    Cancelled,

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Marker operation failed: {0}")]
    MarkerFailed(String),

    #[error("Surface {surface} has no elevation at ({x:.3}, {y:.3})")]
    SurfaceSample { surface: Handle, x: f64, y: f64 },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    File(#[from] FileError),
}

impl CommandError {
    pub fn invalid_selection(details: impl Into<String>) -> Self {
        Self::InvalidSelection(details.into())
    }

    pub fn marker_failed(details: impl Into<String>) -> Self {
        Self::MarkerFailed(details.into())
    }
}

/// 用户取消时返回 `Cancelled`
pub(crate) trait OrCancelled<T> {
    fn or_cancelled(self) -> CommandResult<T>;
}

impl<T> OrCancelled<T> for Option<T> {
    fn or_cancelled(self) -> CommandResult<T> {
        self.ok_or(CommandError::Cancelled)
    }
}
