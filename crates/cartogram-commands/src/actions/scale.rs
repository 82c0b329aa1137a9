//! 比例命令

use crate::error::{CommandResult, OrCancelled};
use crate::session::{Services, Session};

/// 报告当前图纸比例
pub fn get_scale(session: &mut Session, services: &mut Services<'_>) -> CommandResult<f64> {
    let scale = session.config.drawing_scale();
    services.report(format!("Scale: 1:{scale:.0}"));
    Ok(scale)
}

/// 设置全局比例系数
pub fn set_scale(session: &mut Session, services: &mut Services<'_>) -> CommandResult<f64> {
    let factor = services
        .prompt
        .prompt_number("Global scale factor: ", session.config.scale_factor)
        .or_cancelled()?;

    session.config.set_scale_factor(factor)?;
    tracing::info!("Scale factor set to {} (1:{:.0})", factor, session.config.drawing_scale());

    Ok(factor)
}
