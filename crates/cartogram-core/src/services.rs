//! 外部协作接口
//!
//! 核心不直接操作图形、提示或曲面，只通过这些接口与宿主交互：
//! - `MarkerService`: 在图中创建、删除标记并修改其属性
//! - `PromptService`: 交互式选择与输入
//! - `SurfaceSampler`: 曲面高程取样
//! - `MessageSink`: 面向用户的消息

use crate::elevation::Elevation;
use crate::handle::Handle;
use crate::math::{Point2, Point3};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 标记属性：标签 -> 文本
pub type Attributes = BTreeMap<String, String>;

/// 块属性标签
pub mod tags {
    /// 原地面高程
    pub const EG_ELEV: &str = "EG_ELEV";
    /// 设计高程
    pub const DESIGN_ELEV_TOP: &str = "DESIGN_ELEV_TOP";
    /// 面层厚度
    pub const DESIGN_WORK: &str = "DESIGN_WORK";
    /// 施工高度（厘米）
    pub const CUT_FILL: &str = "CUT_FILL";
    pub const VOL: &str = "VOL";
    pub const AVG: &str = "AVG";
    pub const AREA: &str = "AREA";
    pub const NMB: &str = "NMB";
    pub const NMB_V: &str = "NMB_V";
}

/// 作业点块的属性
pub fn elevation_attributes(elevation: &Elevation) -> Attributes {
    let mut attributes = Attributes::new();
    if !elevation.zero_point {
        attributes.insert(
            tags::EG_ELEV.to_string(),
            format!("{:.4}", elevation.existing_elevation),
        );
        attributes.insert(
            tags::DESIGN_ELEV_TOP.to_string(),
            format!("{:.4}", elevation.design_elevation),
        );
        attributes.insert(tags::DESIGN_WORK.to_string(), format!("{:.3}", elevation.ground));
    }
    attributes.insert(tags::CUT_FILL.to_string(), format!("{:.0}", elevation.work_value_cm()));
    attributes
}

/// 图形标注块的属性
///
/// `average_cm` 为平均施工高度（厘米），`volume` 为土方量（立方米）。
pub fn figure_attributes(number: u32, area: f64, average_cm: f64, volume: f64) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(tags::VOL.to_string(), format!("{volume:.0}"));
    attributes.insert(tags::AVG.to_string(), format!("{average_cm:.0}"));
    attributes.insert(tags::AREA.to_string(), format!("{area:.0}"));
    attributes.insert(tags::NMB.to_string(), number.to_string());
    attributes.insert(tags::NMB_V.to_string(), number.to_string());
    attributes
}

/// 标记类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// 作业点块
    Elevation,
    /// 图形标注块
    Figure,
    /// 图形填充
    Hatch,
    /// 零线
    ZeroLine,
    /// 施工高度文字
    WorkText,
}

impl MarkerKind {
    /// 图中使用的块/图层名
    pub fn block_name(&self) -> &'static str {
        match self {
            MarkerKind::Elevation => "CG_Elevation",
            MarkerKind::Figure => "CG_Figure",
            MarkerKind::Hatch => "CG_Hatch",
            MarkerKind::ZeroLine => "CG_ZeroLine",
            MarkerKind::WorkText => "CG_WorkText",
        }
    }
}

/// 标记的几何与属性
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerGeometry {
    /// 块参照
    Block {
        position: Point2,
        scale: f64,
        attributes: Attributes,
    },
    /// 闭合边界的填充
    Hatch {
        boundary: Vec<Point2>,
        color: u8,
        pattern: String,
        scale: f64,
    },
    /// 虚线
    Line { start: Point3, end: Point3, color: u8 },
    /// 文字
    Text {
        position: Point3,
        content: String,
        height: f64,
        color: u8,
    },
}

/// 图形标记服务
pub trait MarkerService {
    /// 创建标记，失败返回 `None`
    fn create_marker(&mut self, kind: MarkerKind, geometry: MarkerGeometry) -> Option<Handle>;

    /// 删除标记，标记不存在时返回 `false`
    fn erase_marker(&mut self, handle: &Handle) -> bool;

    /// 标记类型，不存在时返回 `None`
    fn marker_kind(&self, handle: &Handle) -> Option<MarkerKind>;

    /// 修改块属性，标记或标签不存在时返回 `false`
    fn set_attribute(&mut self, handle: &Handle, tag: &str, text: &str) -> bool;
}

/// 交互提示服务，`None` 表示用户取消
pub trait PromptService {
    fn select_markers(&mut self, message: &str) -> Option<Vec<Handle>>;

    fn prompt_number(&mut self, message: &str, default: f64) -> Option<f64>;

    fn prompt_integer(&mut self, message: &str, default: i64) -> Option<i64>;

    fn prompt_point(&mut self, message: &str) -> Option<Point2>;

    fn select_surface(&mut self, message: &str) -> Option<Handle>;

    fn prompt_path(&mut self, message: &str) -> Option<PathBuf>;
}

/// 曲面高程取样
pub trait SurfaceSampler {
    /// 点不在曲面范围内时返回 `None`
    fn sample_elevation(&self, surface: &Handle, x: f64, y: f64) -> Option<f64>;
}

/// 用户消息输出
pub trait MessageSink {
    fn report(&mut self, text: &str);
}

/// 把消息写入日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn report(&mut self, text: &str) {
        tracing::info!("{}", text);
    }
}

impl MessageSink for Vec<String> {
    fn report(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Position;

    #[test]
    fn test_elevation_attributes() {
        let elevation = Elevation::new(Position::new(0.0, 0.0), 101.2345, 101.0, 0.2);
        let attributes = elevation_attributes(&elevation);

        assert_eq!(attributes[tags::EG_ELEV], "101.2345");
        assert_eq!(attributes[tags::DESIGN_ELEV_TOP], "101.0000");
        assert_eq!(attributes[tags::DESIGN_WORK], "0.200");
        assert_eq!(attributes[tags::CUT_FILL], "-43");
    }

    #[test]
    fn test_zero_point_attributes() {
        let attributes = elevation_attributes(&Elevation::zero_point(Position::default()));
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[tags::CUT_FILL], "0");
    }

    #[test]
    fn test_figure_attributes() {
        let attributes = figure_attributes(7, 100.4, -30.2, -30.32);
        assert_eq!(attributes[tags::VOL], "-30");
        assert_eq!(attributes[tags::AVG], "-30");
        assert_eq!(attributes[tags::AREA], "100");
        assert_eq!(attributes[tags::NMB], "7");
        assert_eq!(attributes[tags::NMB_V], "7");
    }

    #[test]
    fn test_vec_sink_collects_messages() {
        let mut sink: Vec<String> = Vec::new();
        sink.report("first");
        sink.report("second");
        assert_eq!(sink, vec!["first".to_string(), "second".to_string()]);
    }
}
