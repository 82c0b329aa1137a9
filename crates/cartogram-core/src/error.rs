//! 核心错误定义

use crate::handle::Handle;
use thiserror::Error;

/// 核心操作的结果类型
pub type GeoResult<T> = Result<T, GeoError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Degenerate angle: {0}")]
    DegenerateAngle(String),

    #[error("Duplicate handle: {0}")]
    DuplicateHandle(Handle),

    #[error("Figure not found: {0}")]
    FigureNotFound(Handle),

    #[error("Elevation not found: {0}")]
    ElevationNotFound(Handle),

    #[error("Cannot mix cut and fill work points in one figure ({positive} positive, {negative} negative)")]
    MixedSigns { positive: usize, negative: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl GeoError {
    pub fn invalid_geometry(details: impl Into<String>) -> Self {
        Self::InvalidGeometry(details.into())
    }

    pub fn degenerate_angle(details: impl Into<String>) -> Self {
        Self::DegenerateAngle(details.into())
    }
}
