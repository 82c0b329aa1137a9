//! 数据导入/导出命令

use crate::error::{CommandResult, OrCancelled};
use crate::session::{Services, Session};
use cartogram_file::text::{import_file, write_file, HeaderStyle, ImportSummary};
use std::path::PathBuf;

/// 从文本文件导入作业点和图形
pub fn import_data(
    session: &mut Session,
    services: &mut Services<'_>,
) -> CommandResult<ImportSummary> {
    let path = services
        .prompt
        .prompt_path("Select data file to import: ")
        .or_cancelled()?;

    let summary = import_file(&mut session.registry, &path)?;

    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    services.report(format!(
        "File {name} was added to the registry ({} figures, {} elevations)",
        summary.figures, summary.elevations
    ));

    Ok(summary)
}

/// 把注册表导出为文本文件
pub fn export_data(session: &mut Session, services: &mut Services<'_>) -> CommandResult<PathBuf> {
    let path = services
        .prompt
        .prompt_path("Select export file: ")
        .or_cancelled()?;

    write_file(&session.registry, &path, HeaderStyle::Delimited)?;
    services.report(format!("Data exported to {}", path.display()));

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use crate::testing::Harness;
    use cartogram_file::FileError;

    #[test]
    fn test_export_then_import() {
        let file_path = std::env::temp_dir().join("cartogram_test_command_data.txt");

        let mut source = Harness::new();
        let square = source.fill_square();
        let figure = source.add_figure(&square);
        source.prompt.paths.push_back(file_path.clone());
        assert_eq!(source.run(export_data).unwrap(), file_path);

        let mut target = Harness::new();
        target.prompt.paths.push_back(file_path.clone());
        let summary = target.run(import_data).unwrap();

        assert_eq!(summary.figures, 1);
        assert_eq!(summary.elevations, 4);
        let imported = target.session.registry.figure(&figure).unwrap();
        assert_eq!(imported.elevations(), square.as_slice());
        assert!(target.messages[0].contains("cartogram_test_command_data.txt"));

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_import_missing_file() {
        let mut h = Harness::new();
        h.prompt
            .paths
            .push_back(std::env::temp_dir().join("cartogram_missing_command_data.txt"));

        assert!(matches!(
            h.run(import_data),
            Err(CommandError::File(FileError::FileNotFound(_)))
        ));
    }
}
