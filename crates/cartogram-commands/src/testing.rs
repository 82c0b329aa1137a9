//! 命令测试用的脚本化协作者

use crate::actions::figure::create_figure;
use crate::session::{Services, Session};
use cartogram_core::prelude::*;
use cartogram_file::DxfSheet;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

/// 按脚本依次应答的提示服务，脚本用完即视为取消
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    pub selections: VecDeque<Vec<Handle>>,
    pub numbers: VecDeque<f64>,
    pub integers: VecDeque<i64>,
    pub points: VecDeque<Point2>,
    pub surfaces: VecDeque<Handle>,
    pub paths: VecDeque<PathBuf>,
}

impl PromptService for ScriptedPrompt {
    fn select_markers(&mut self, _message: &str) -> Option<Vec<Handle>> {
        self.selections.pop_front()
    }

    fn prompt_number(&mut self, _message: &str, _default: f64) -> Option<f64> {
        self.numbers.pop_front()
    }

    fn prompt_integer(&mut self, _message: &str, _default: i64) -> Option<i64> {
        self.integers.pop_front()
    }

    fn prompt_point(&mut self, _message: &str) -> Option<Point2> {
        self.points.pop_front()
    }

    fn select_surface(&mut self, _message: &str) -> Option<Handle> {
        self.surfaces.pop_front()
    }

    fn prompt_path(&mut self, _message: &str) -> Option<PathBuf> {
        self.paths.pop_front()
    }
}

/// 可在若干次创建后失败的标记服务
#[derive(Debug, Default)]
pub struct FlakyMarkers {
    pub sheet: DxfSheet,
    limit: Option<usize>,
    created: usize,
}

impl FlakyMarkers {
    /// 再成功创建 `count` 个标记后开始失败
    pub fn fail_after(&mut self, count: usize) {
        self.limit = Some(self.created + count);
    }
}

impl MarkerService for FlakyMarkers {
    fn create_marker(&mut self, kind: MarkerKind, geometry: MarkerGeometry) -> Option<Handle> {
        if self.limit.is_some_and(|limit| self.created >= limit) {
            return None;
        }
        let handle = self.sheet.create_marker(kind, geometry)?;
        self.created += 1;
        Some(handle)
    }

    fn erase_marker(&mut self, handle: &Handle) -> bool {
        self.sheet.erase_marker(handle)
    }

    fn marker_kind(&self, handle: &Handle) -> Option<MarkerKind> {
        self.sheet.marker_kind(handle)
    }

    fn set_attribute(&mut self, handle: &Handle, tag: &str, text: &str) -> bool {
        self.sheet.set_attribute(handle, tag, text)
    }
}

/// 水平曲面，范围为以原点为中心的正方形
#[derive(Debug, Default)]
pub struct FlatSurfaces {
    surfaces: HashMap<Handle, (f64, f64)>,
}

impl FlatSurfaces {
    pub fn add(&mut self, name: &str, elevation: f64, extent: f64) {
        self.surfaces.insert(Handle::from(name), (elevation, extent));
    }
}

impl SurfaceSampler for FlatSurfaces {
    fn sample_elevation(&self, surface: &Handle, x: f64, y: f64) -> Option<f64> {
        let (elevation, extent) = self.surfaces.get(surface)?;
        (x.abs() <= *extent && y.abs() <= *extent).then_some(*elevation)
    }
}

/// 会话加全部协作者
#[derive(Debug, Default)]
pub struct Harness {
    pub session: Session,
    pub markers: FlakyMarkers,
    pub prompt: ScriptedPrompt,
    pub surfaces: FlatSurfaces,
    pub messages: Vec<String>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以当前协作者执行命令
    pub fn run<T>(&mut self, command: impl FnOnce(&mut Session, &mut Services<'_>) -> T) -> T {
        let mut services = Services::new(
            &mut self.markers,
            &mut self.prompt,
            &self.surfaces,
            &mut self.messages,
        );
        command(&mut self.session, &mut services)
    }

    pub fn select(&mut self, handles: &[Handle]) {
        self.prompt.selections.push_back(handles.to_vec());
    }

    /// 直接放置一个作业点（原地面100，施工高度为 `value`）
    pub fn add_elevation(&mut self, northing: f64, easting: f64, value: f64) -> Handle {
        let elevation = Elevation::new(Position::new(northing, easting), 100.0, 100.0 + value, 0.0);
        self.place(elevation)
    }

    pub fn add_zero_point(&mut self, northing: f64, easting: f64) -> Handle {
        self.place(Elevation::zero_point(Position::new(northing, easting)))
    }

    fn place(&mut self, elevation: Elevation) -> Handle {
        let geometry = MarkerGeometry::Block {
            position: elevation.position.to_point2(),
            scale: 1.0,
            attributes: elevation_attributes(&elevation),
        };
        let handle = self
            .markers
            .sheet
            .create_marker(MarkerKind::Elevation, geometry)
            .unwrap();
        self.session
            .registry
            .add_elevation(handle.clone(), elevation)
            .unwrap();
        handle
    }

    /// 10×10 的填方方格，施工高度 0.2/0.4/0.4/0.2
    pub fn fill_square(&mut self) -> Vec<Handle> {
        vec![
            self.add_elevation(0.0, 0.0, 0.2),
            self.add_elevation(0.0, 10.0, 0.4),
            self.add_elevation(10.0, 10.0, 0.4),
            self.add_elevation(10.0, 0.0, 0.2),
        ]
    }

    /// 通过建图命令创建图形
    pub fn add_figure(&mut self, members: &[Handle]) -> Handle {
        self.select(members);
        self.run(create_figure).unwrap()
    }

    pub fn attribute(&self, handle: &Handle, tag: &str) -> Option<String> {
        self.markers.sheet.attribute(handle, tag).map(str::to_string)
    }
}
