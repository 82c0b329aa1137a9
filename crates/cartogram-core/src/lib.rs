//! 土方方格网核心
//!
//! 提供土方（填挖）设计所需的数据模型与计算：
//! - 作业点（施工高度点）与图形（填挖区域）
//! - 几何内核：面积、形心、零点、方位角与坡线角
//! - 注册表：按外部句柄保存数据并维护一致性
//! - 土方量分级统计
//!
//! # 示例
//!
//! ```rust
//! use cartogram_core::prelude::*;
//!
//! let square = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ];
//! assert_eq!(polygon_area(&square).unwrap(), 100.0);
//! ```

pub mod angle;
pub mod config;
pub mod elevation;
pub mod error;
pub mod figure;
pub mod geometry;
pub mod handle;
pub mod math;
pub mod registry;
pub mod services;
pub mod volume;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::angle::{
        gradians_to_radians, heading, polygon_angle, radians_to_gradians,
        slope_line_rotation_angle, slope_marker_rotation,
    };
    pub use crate::config::DesignConfig;
    pub use crate::elevation::Elevation;
    pub use crate::error::{GeoError, GeoResult};
    pub use crate::figure::{Figure, FigureData, FigurePlan, FigureState};
    pub use crate::geometry::{
        close_ring, find_zero_crossing, polygon_area, polygon_centroid, side_of_line,
        zero_crossings_along, zero_line_segments,
    };
    pub use crate::handle::Handle;
    pub use crate::math::{Point2, Point3, Position, Vector2, EPSILON};
    pub use crate::registry::GeoRegistry;
    pub use crate::services::{
        elevation_attributes, figure_attributes, tags, Attributes, MarkerGeometry, MarkerKind,
        MarkerService, MessageSink, PromptService, SurfaceSampler, TracingSink,
    };
    pub use crate::volume::{VolumeBand, VolumeReport};
}
