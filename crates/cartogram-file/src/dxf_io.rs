//! DXF图纸输出
//!
//! `DxfSheet` 在内存中保存标记并实现 `MarkerService`，
//! 命令层对它的操作与对真实图形数据库一致；保存时转换为DXF实体，
//! 每类标记放在同名图层上。

use crate::error::FileError;
use cartogram_core::config::DesignConfig;
use cartogram_core::handle::Handle;
use cartogram_core::registry::GeoRegistry;
use cartogram_core::services::{
    elevation_attributes, figure_attributes, MarkerGeometry, MarkerKind, MarkerService,
};
use std::path::Path;

/// 句柄从此值开始分配（十六进制）
const FIRST_HANDLE: u64 = 0x100;

/// 块属性文字的行距系数
const ATTRIBUTE_LINE_SPACING: f64 = 1.4;

/// 零线使用的虚线线型
const ZERO_LINE_TYPE: &str = "DASHED";

/// 所有图层及其颜色（ACI）
const LAYERS: [(MarkerKind, u8); 5] = [
    (MarkerKind::Elevation, 7),
    (MarkerKind::Figure, 7),
    (MarkerKind::Hatch, 8),
    (MarkerKind::ZeroLine, 1),
    (MarkerKind::WorkText, 3),
];

#[derive(Debug, Clone)]
struct Marker {
    handle: Handle,
    kind: MarkerKind,
    geometry: MarkerGeometry,
}

/// 渲染注册表的结果统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub elevations: usize,
    pub figures: usize,
    /// 已损坏或填挖混合而未绘制的图形
    pub skipped_figures: usize,
}

/// 内存中的DXF图纸
#[derive(Debug)]
pub struct DxfSheet {
    markers: Vec<Marker>,
    next_handle: u64,
}

impl Default for DxfSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl DxfSheet {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            next_handle: FIRST_HANDLE,
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// 所有标记的句柄和类型，按创建顺序
    pub fn markers(&self) -> impl Iterator<Item = (&Handle, MarkerKind)> {
        self.markers.iter().map(|m| (&m.handle, m.kind))
    }

    /// 标记的几何
    pub fn geometry(&self, handle: &Handle) -> Option<&MarkerGeometry> {
        self.find(handle).map(|m| &m.geometry)
    }

    /// 块属性值
    pub fn attribute(&self, handle: &Handle, tag: &str) -> Option<&str> {
        match self.geometry(handle)? {
            MarkerGeometry::Block { attributes, .. } => attributes.get(tag).map(String::as_str),
            _ => None,
        }
    }

    fn find(&self, handle: &Handle) -> Option<&Marker> {
        self.markers.iter().find(|m| &m.handle == handle)
    }

    fn allocate_handle(&mut self) -> Handle {
        let handle = Handle::new(format!("{:X}", self.next_handle));
        self.next_handle += 1;
        handle
    }

    /// 把整个注册表绘制到图纸上
    pub fn render_registry(
        &mut self,
        registry: &GeoRegistry,
        config: &DesignConfig,
    ) -> RenderSummary {
        draw_registry(self, registry, config)
    }

    /// 转换为DXF图纸
    pub fn to_drawing(&self) -> dxf::Drawing {
        let mut drawing = dxf::Drawing::new();

        // 划线 0.5，空白 0.25
        drawing.add_line_type(dxf::tables::LineType {
            name: ZERO_LINE_TYPE.to_string(),
            description: "Dashed __ __ __".to_string(),
            element_count: 2,
            total_pattern_length: 0.75,
            dash_dot_space_lengths: vec![0.5, -0.25],
            ..Default::default()
        });

        for (kind, color) in LAYERS {
            let mut dxf_layer = dxf::tables::Layer::default();
            dxf_layer.name = kind.block_name().to_string();
            dxf_layer.color = dxf::Color::from_index(color);
            if kind == MarkerKind::ZeroLine {
                dxf_layer.line_type_name = ZERO_LINE_TYPE.to_string();
            }
            drawing.add_layer(dxf_layer);
        }

        for marker in &self.markers {
            for dxf_entity in convert_marker(marker) {
                drawing.add_entity(dxf_entity);
            }
        }

        drawing
    }

    /// 保存为DXF文件
    pub fn save(&self, path: &Path) -> Result<(), FileError> {
        self.to_drawing()
            .save_file(path)
            .map_err(|e| FileError::Dxf(e.to_string()))?;

        tracing::info!("Saved {} markers to {}", self.markers.len(), path.display());
        Ok(())
    }
}

impl MarkerService for DxfSheet {
    fn create_marker(&mut self, kind: MarkerKind, geometry: MarkerGeometry) -> Option<Handle> {
        let valid = match &geometry {
            MarkerGeometry::Block { scale, .. } => *scale > 0.0,
            MarkerGeometry::Hatch { boundary, scale, .. } => boundary.len() >= 3 && *scale > 0.0,
            MarkerGeometry::Line { .. } => true,
            MarkerGeometry::Text { height, .. } => *height > 0.0,
        };
        if !valid {
            tracing::debug!("Rejected invalid {} marker", kind.block_name());
            return None;
        }

        let handle = self.allocate_handle();
        self.markers.push(Marker {
            handle: handle.clone(),
            kind,
            geometry,
        });
        Some(handle)
    }

    fn erase_marker(&mut self, handle: &Handle) -> bool {
        match self.markers.iter().position(|m| &m.handle == handle) {
            Some(index) => {
                self.markers.remove(index);
                true
            }
            None => false,
        }
    }

    fn marker_kind(&self, handle: &Handle) -> Option<MarkerKind> {
        self.find(handle).map(|m| m.kind)
    }

    fn set_attribute(&mut self, handle: &Handle, tag: &str, text: &str) -> bool {
        let Some(marker) = self.markers.iter_mut().find(|m| &m.handle == handle) else {
            return false;
        };

        match &mut marker.geometry {
            MarkerGeometry::Block { attributes, .. } => match attributes.get_mut(tag) {
                Some(value) => {
                    *value = text.to_string();
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// 把整个注册表绘制到任意标记服务上
///
/// 注册表只按句柄引用外部标记，这里重新生成全部标记，
/// 已损坏或填挖混合的图形不绘制；标注块创建失败时删除其填充。
pub fn draw_registry(
    markers: &mut dyn MarkerService,
    registry: &GeoRegistry,
    config: &DesignConfig,
) -> RenderSummary {
    let mut summary = RenderSummary::default();
    let scale = config.scale_factor;

    let mut elevations: Vec<_> = registry.elevations().collect();
    elevations.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

    for (_, elevation) in elevations {
        let geometry = MarkerGeometry::Block {
            position: elevation.position.to_point2(),
            scale,
            attributes: elevation_attributes(elevation),
        };
        if markers.create_marker(MarkerKind::Elevation, geometry).is_some() {
            summary.elevations += 1;
        }
    }

    let mut figures: Vec<_> = registry.figures().collect();
    figures.sort_by_key(|(_, figure)| figure.number);

    for (handle, figure) in figures {
        let data = match registry.figure_data(handle) {
            Ok(data) if !data.destroyed && data.single_figure => data,
            _ => {
                tracing::warn!("Figure {} is not drawable, skipped", handle);
                summary.skipped_figures += 1;
                continue;
            }
        };
        let Some(ring) = registry.figure_ring(handle) else {
            summary.skipped_figures += 1;
            continue;
        };
        let Some(centroid) = cartogram_core::geometry::polygon_centroid(&ring) else {
            tracing::warn!("Figure {} has a degenerate boundary, skipped", handle);
            summary.skipped_figures += 1;
            continue;
        };

        let hatch = MarkerGeometry::Hatch {
            boundary: ring,
            color: config.hatch_color(data.average_elevation),
            pattern: config.hatch_pattern.clone(),
            scale,
        };
        let block = MarkerGeometry::Block {
            position: centroid,
            scale,
            attributes: figure_attributes(
                figure.number,
                data.area,
                data.average_elevation_cm(),
                data.volume(),
            ),
        };

        let Some(hatch_handle) = markers.create_marker(MarkerKind::Hatch, hatch) else {
            summary.skipped_figures += 1;
            continue;
        };
        if markers.create_marker(MarkerKind::Figure, block).is_none() {
            markers.erase_marker(&hatch_handle);
            summary.skipped_figures += 1;
            continue;
        }
        summary.figures += 1;
    }

    tracing::info!(
        "Rendered {} elevations, {} figures ({} skipped)",
        summary.elevations,
        summary.figures,
        summary.skipped_figures
    );

    summary
}

/// 将标记转换为DXF实体
fn convert_marker(marker: &Marker) -> Vec<dxf::entities::Entity> {
    let layer = marker.kind.block_name();

    let specifics: Vec<(dxf::entities::EntityType, Option<u8>)> = match &marker.geometry {
        MarkerGeometry::Block {
            position,
            scale,
            attributes,
        } => {
            let mut dxf_point = dxf::entities::ModelPoint::default();
            dxf_point.location = dxf::Point::new(position.x, position.y, 0.0);

            let mut entities = vec![(dxf::entities::EntityType::ModelPoint(dxf_point), None)];

            // 属性文字自插入点向下逐行排列
            let height = 1.5 * scale;
            for (row, value) in attributes.values().enumerate() {
                let mut dxf_text = dxf::entities::Text::default();
                let offset = (row as f64 + 1.0) * height * ATTRIBUTE_LINE_SPACING;
                dxf_text.location = dxf::Point::new(position.x, position.y - offset, 0.0);
                dxf_text.text_height = height;
                dxf_text.value = value.clone();
                entities.push((dxf::entities::EntityType::Text(dxf_text), None));
            }
            entities
        }

        MarkerGeometry::Hatch { boundary, color, .. } => {
            let mut lwpoly = dxf::entities::LwPolyline::default();
            lwpoly.set_is_closed(true);
            lwpoly.vertices = boundary
                .iter()
                .map(|p| {
                    let mut vertex = dxf::LwPolylineVertex::default();
                    vertex.x = p.x;
                    vertex.y = p.y;
                    vertex
                })
                .collect();
            vec![(dxf::entities::EntityType::LwPolyline(lwpoly), Some(*color))]
        }

        MarkerGeometry::Line { start, end, color } => {
            let mut dxf_line = dxf::entities::Line::default();
            dxf_line.p1 = dxf::Point::new(start.x, start.y, start.z);
            dxf_line.p2 = dxf::Point::new(end.x, end.y, end.z);
            vec![(dxf::entities::EntityType::Line(dxf_line), Some(*color))]
        }

        MarkerGeometry::Text {
            position,
            content,
            height,
            color,
        } => {
            let mut dxf_text = dxf::entities::Text::default();
            dxf_text.location = dxf::Point::new(position.x, position.y, position.z);
            dxf_text.text_height = *height;
            dxf_text.value = content.clone();
            vec![(dxf::entities::EntityType::Text(dxf_text), Some(*color))]
        }
    };

    specifics
        .into_iter()
        .map(|(specific, color)| {
            let mut dxf_entity = dxf::entities::Entity::new(specific);
            dxf_entity.common.layer = layer.to_string();
            if marker.kind == MarkerKind::ZeroLine {
                dxf_entity.common.line_type_name = ZERO_LINE_TYPE.to_string();
            }
            if let Some(aci) = color {
                dxf_entity.common.color = dxf::Color::from_index(aci);
            }
            dxf_entity
        })
        .collect()
}
