//! 土方数据文件处理
//!
//! 支持：
//! - 文本交换格式的导入/导出
//! - 设计参数的JSON读写
//! - `.dxf` 图纸输出（内存标记服务）

pub mod dxf_io;
pub mod error;
pub mod settings;
pub mod text;

pub use dxf_io::{draw_registry, DxfSheet, RenderSummary};
pub use error::FileError;
pub use settings::{load_config, save_config};
pub use text::{
    export_data, export_data_with, import_file, import_str, write_file, HeaderStyle, ImportSummary,
};
