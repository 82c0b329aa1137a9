//! 土方设计命令
//!
//! 每个命令通过协作者接口与图形、提示和曲面交互：
//! - 作业点：插入、删除、按曲面重算、插值零点
//! - 图形：创建、删除、重新编号
//! - 土方量统计与零线绘制
//! - 数据同步、导入/导出与比例设置
//!
//! 修改作业点的命令完成后都会执行图形维护（`maintenance::update_figures`）。

pub mod actions;
pub mod command;
pub mod command_registry;
pub mod error;
pub mod maintenance;
pub mod session;

#[cfg(test)]
mod testing;

pub use actions::execute;
pub use command::CommandType;
pub use command_registry::CommandRegistry;
pub use error::{CommandError, CommandResult};
pub use session::{Services, Session};
