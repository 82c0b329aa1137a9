//! 作业点与图形注册表
//!
//! 注册表是图形数据在会话内的权威缓存：
//! - 按外部句柄保存作业点与图形
//! - 维护下一个图形编号
//! - 提供一致性查询（受影响图形、清理、派生数据）
//!
//! 注册表由调用方持有并显式传入各操作，没有全局单例。

use crate::elevation::Elevation;
use crate::error::{GeoError, GeoResult};
use crate::figure::{Figure, FigureData, FigurePlan};
use crate::geometry::{polygon_area, polygon_centroid};
use crate::handle::Handle;
use crate::math::Point2;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// 成员作业点的符号统计
#[derive(Debug, Default)]
struct SignTally {
    sum: f64,
    positive: usize,
    negative: usize,
    zero_points: usize,
}

impl SignTally {
    fn add(&mut self, elevation: &Elevation) {
        let value = elevation.value();
        self.sum += value;
        if value > 0.0 {
            self.positive += 1;
        }
        if value < 0.0 {
            self.negative += 1;
        }
        if elevation.zero_point {
            self.zero_points += 1;
        }
    }

    fn is_mixed(&self) -> bool {
        self.positive > 0 && self.negative > 0
    }

    fn is_single(&self) -> bool {
        !(self.is_mixed() || self.zero_points > 0)
    }
}

/// 作业点与图形注册表
#[derive(Debug)]
pub struct GeoRegistry {
    elevations: HashMap<Handle, Elevation>,
    figures: HashMap<Handle, Figure>,
    next_figure_number: u32,
}

impl Default for GeoRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoRegistry {
    pub fn new() -> Self {
        Self {
            elevations: HashMap::new(),
            figures: HashMap::new(),
            next_figure_number: 1,
        }
    }

    // ===== 作业点 =====

    /// 添加作业点，句柄已存在时返回 `DuplicateHandle` 且不覆盖
    pub fn add_elevation(&mut self, handle: Handle, elevation: Elevation) -> GeoResult<()> {
        match self.elevations.entry(handle) {
            Entry::Occupied(entry) => Err(GeoError::DuplicateHandle(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(elevation);
                Ok(())
            }
        }
    }

    /// 移除作业点，不存在时不做任何事
    pub fn remove_elevation(&mut self, handle: &Handle) -> Option<Elevation> {
        self.elevations.remove(handle)
    }

    pub fn contains_elevation(&self, handle: &Handle) -> bool {
        self.elevations.contains_key(handle)
    }

    pub fn elevation(&self, handle: &Handle) -> Option<&Elevation> {
        self.elevations.get(handle)
    }

    /// 可变访问，用于按曲面重新取样
    pub fn elevation_mut(&mut self, handle: &Handle) -> Option<&mut Elevation> {
        self.elevations.get_mut(handle)
    }

    pub fn elevations(&self) -> impl Iterator<Item = (&Handle, &Elevation)> {
        self.elevations.iter()
    }

    pub fn elevation_count(&self) -> usize {
        self.elevations.len()
    }

    // ===== 图形 =====

    /// 添加图形，句柄已存在时返回 `DuplicateHandle` 且不覆盖
    pub fn add_figure(&mut self, handle: Handle, figure: Figure) -> GeoResult<()> {
        match self.figures.entry(handle) {
            Entry::Occupied(entry) => Err(GeoError::DuplicateHandle(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(figure);
                Ok(())
            }
        }
    }

    /// 移除图形，不存在时不做任何事
    pub fn remove_figure(&mut self, handle: &Handle) -> Option<Figure> {
        self.figures.remove(handle)
    }

    pub fn contains_figure(&self, handle: &Handle) -> bool {
        self.figures.contains_key(handle)
    }

    pub fn figure(&self, handle: &Handle) -> Option<&Figure> {
        self.figures.get(handle)
    }

    pub fn figure_mut(&mut self, handle: &Handle) -> Option<&mut Figure> {
        self.figures.get_mut(handle)
    }

    pub fn figures(&self) -> impl Iterator<Item = (&Handle, &Figure)> {
        self.figures.iter()
    }

    pub fn figure_count(&self) -> usize {
        self.figures.len()
    }

    // ===== 图形编号 =====

    pub fn next_figure_number(&self) -> u32 {
        self.next_figure_number
    }

    pub fn set_next_figure_number(&mut self, number: u32) {
        self.next_figure_number = number;
    }

    /// 取出当前编号并递增，编号用尽时返回 `InvalidParameter` 且不改变计数
    pub fn allocate_figure_number(&mut self) -> GeoResult<u32> {
        let number = self.next_figure_number;
        self.next_figure_number = number.checked_add(1).ok_or_else(|| {
            GeoError::InvalidParameter(format!("Figure number {number} cannot be followed"))
        })?;
        Ok(number)
    }

    // ===== 一致性 =====

    /// 移除所有不在权威句柄集合中的图形，返回移除数量
    pub fn purge_figures(&mut self, authoritative: &HashSet<Handle>) -> usize {
        let before = self.figures.len();
        self.figures.retain(|handle, _| authoritative.contains(handle));
        let purged = before - self.figures.len();

        if purged > 0 {
            tracing::debug!("Purged {} figures from registry", purged);
        }
        purged
    }

    /// 移除所有不在权威句柄集合中的作业点，返回移除数量
    pub fn purge_elevations(&mut self, authoritative: &HashSet<Handle>) -> usize {
        let before = self.elevations.len();
        self.elevations.retain(|handle, _| authoritative.contains(handle));
        let purged = before - self.elevations.len();

        if purged > 0 {
            tracing::debug!("Purged {} elevations from registry", purged);
        }
        purged
    }

    /// 成员中包含任一给定作业点的图形
    pub fn affected_figures(&self, elevation_handles: &[Handle]) -> Vec<Handle> {
        let changed: HashSet<&Handle> = elevation_handles.iter().collect();

        self.figures
            .iter()
            .filter(|(_, figure)| figure.elevations().iter().any(|e| changed.contains(e)))
            .map(|(handle, _)| handle.clone())
            .collect()
    }

    /// 计算图形的派生数据
    ///
    /// 遇到第一个缺失的作业点即标记为损坏并停止，不计算部分面积。
    pub fn figure_data(&self, handle: &Handle) -> GeoResult<FigureData> {
        let figure = self
            .figures
            .get(handle)
            .ok_or_else(|| GeoError::FigureNotFound(handle.clone()))?;

        let members = figure.elevations();
        let mut tally = SignTally::default();
        let mut ring = Vec::with_capacity(members.len());

        for member in members {
            let Some(elevation) = self.elevations.get(member) else {
                tracing::debug!("Figure {} references missing elevation {}", handle, member);
                return Ok(FigureData::destroyed());
            };

            tally.add(elevation);
            ring.push(elevation.position.to_point2());
        }

        Ok(FigureData {
            average_elevation: tally.sum / members.len() as f64,
            area: polygon_area(&ring)?,
            single_figure: tally.is_single(),
            destroyed: false,
        })
    }

    /// 图形边界（平面坐标），任一成员缺失时返回 `None`
    pub fn figure_ring(&self, handle: &Handle) -> Option<Vec<Point2>> {
        self.figures
            .get(handle)?
            .elevations()
            .iter()
            .map(|member| self.elevations.get(member).map(|e| e.position.to_point2()))
            .collect()
    }

    /// 校验一组作业点能否组成新图形
    ///
    /// 在任何外部操作之前调用：少于3点、作业点未登记、填挖混合（且无零点）都会失败。
    pub fn plan_figure(&self, members: &[Handle]) -> GeoResult<FigurePlan> {
        if members.len() < 3 {
            return Err(GeoError::invalid_geometry(format!(
                "Cannot create a figure with less than 3 elevations ({} given)",
                members.len()
            )));
        }

        let mut tally = SignTally::default();
        let mut ring = Vec::with_capacity(members.len());

        for member in members {
            let elevation = self
                .elevations
                .get(member)
                .ok_or_else(|| GeoError::ElevationNotFound(member.clone()))?;

            tally.add(elevation);
            ring.push(elevation.position.to_point2());
        }

        if tally.is_mixed() && tally.zero_points == 0 {
            return Err(GeoError::MixedSigns {
                positive: tally.positive,
                negative: tally.negative,
            });
        }

        let area = polygon_area(&ring)?;
        let centroid = polygon_centroid(&ring);

        Ok(FigurePlan {
            ring,
            area,
            average_elevation: tally.sum / members.len() as f64,
            centroid,
        })
    }
}
