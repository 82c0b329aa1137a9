//! 注册表与图形同步

use crate::error::{CommandError, CommandResult, OrCancelled};
use crate::session::{Services, Session};
use cartogram_core::handle::Handle;
use std::collections::HashSet;

/// 同步时移除的登记数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncSummary {
    pub figures: usize,
    pub elevations: usize,
}

/// 以所选标记为准，清除注册表中已不在图中的图形和作业点
pub fn synchronize(
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<SyncSummary> {
    let selection = services
        .prompt
        .select_markers("Select all cartogram objects: ")
        .or_cancelled()?;
    if selection.is_empty() {
        return Err(CommandError::invalid_selection("Nothing selected"));
    }

    let authoritative: HashSet<Handle> = selection.into_iter().collect();
    let summary = SyncSummary {
        figures: session.registry.purge_figures(&authoritative),
        elevations: session.registry.purge_elevations(&authoritative),
    };

    services.report(format!("{} figures were removed from the registry", summary.figures));
    services.report(format!("{} elevations were removed from the registry", summary.elevations));

    if summary.figures + summary.elevations > 0 {
        tracing::warn!(
            "Pruned {} figures and {} elevations without markers",
            summary.figures,
            summary.elevations
        );
    }

    Ok(summary)
}
