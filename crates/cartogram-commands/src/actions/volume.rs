//! 土方量统计命令

use crate::error::{CommandResult, OrCancelled};
use crate::session::{Services, Session};
use cartogram_core::volume::VolumeReport;

/// 汇总所选图形的土方量
///
/// 已损坏或填挖混合的图形不计入。
pub fn volume_report(
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<VolumeReport> {
    let selection = services
        .prompt
        .select_markers("Select figures: ")
        .or_cancelled()?;

    let mut report = VolumeReport::new();
    let mut counted = 0;

    for handle in selection {
        if !session.registry.contains_figure(&handle) {
            continue;
        }

        let data = session.registry.figure_data(&handle)?;
        if data.destroyed || !data.single_figure {
            tracing::warn!("Figure {} is destroyed or mixed, not counted", handle);
            continue;
        }

        let band = report.add(data.average_elevation_cm(), data.volume());
        tracing::debug!("Figure {} counted as {:?}", handle, band);
        counted += 1;
    }

    for line in report.to_string().lines() {
        services.report(line);
    }
    tracing::info!("Volume report over {} figures", counted);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use cartogram_core::handle::Handle;

    /// 10×10 方格，四角施工高度相同
    fn square(h: &mut Harness, origin: f64, value: f64) -> Handle {
        let members = vec![
            h.add_elevation(origin, 0.0, value),
            h.add_elevation(origin, 10.0, value),
            h.add_elevation(origin + 10.0, 10.0, value),
            h.add_elevation(origin + 10.0, 0.0, value),
        ];
        h.add_figure(&members)
    }

    #[test]
    fn test_volume_report_bands() {
        let mut h = Harness::new();
        let shallow = square(&mut h, 0.0, -0.10);
        let medium = square(&mut h, 20.0, -0.30);
        let mass = square(&mut h, 40.0, -0.60);
        let fill = square(&mut h, 60.0, 0.05);

        h.select(&[shallow, medium, mass, fill, "UNKNOWN".into()]);
        let report = h.run(volume_report).unwrap();

        assert!((report.cut1 - 10.0).abs() < 1e-6);
        assert!((report.cut2 - 30.0).abs() < 1e-6);
        assert!((report.cut3 - 60.0).abs() < 1e-6);
        assert!((report.fill - 5.0).abs() < 1e-6);

        assert_eq!(h.messages.len(), 4);
        assert_eq!(h.messages[0], "Shallow cut up to 0.15: 10");
        assert_eq!(h.messages[3], "Fill: 5");
    }

    #[test]
    fn test_volume_report_skips_mixed_figures() {
        let mut h = Harness::new();
        let figure = square(&mut h, 0.0, 0.2);
        let member = h.session.registry.figure(&figure).unwrap().elevations()[0].clone();
        h.session.registry.elevation_mut(&member).unwrap().design_elevation = 90.0;

        h.select(&[figure]);
        let report = h.run(volume_report).unwrap();

        assert_eq!(report, VolumeReport::new());
    }
}
