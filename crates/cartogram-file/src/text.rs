//! 文本交换格式
//!
//! 每条记录两行：
//!
//! ```text
//! FIGURE <handle> <number> <hatchHandle>
//! <elev-1>;<elev-2>;...;<elev-n>
//! ELEVATION <handle> <True|False>
//! <existing> <design> <ground> <northing> <easting> <True|False>
//! ```
//!
//! 读入时按首个单词识别记录，未知行与空行忽略。
//! 整个文件解析成功后才写入注册表。
//! 句柄中不能出现空白和 `;`，导出时遇到这样的句柄直接失败。

use crate::error::FileError;
use cartogram_core::elevation::Elevation;
use cartogram_core::figure::Figure;
use cartogram_core::handle::Handle;
use cartogram_core::math::Position;
use cartogram_core::registry::GeoRegistry;
use std::path::Path;

const FIGURE_TAG: &str = "FIGURE";
const ELEVATION_TAG: &str = "ELEVATION";

/// ELEVATION 记录头的写法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// `ELEVATION <handle> <True|False>`
    #[default]
    Delimited,
    /// `ELEVATION <handle><True|False>`，兼容旧文件
    Legacy,
}

/// 导入结果统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub figures: usize,
    pub elevations: usize,
    /// 因句柄重复而跳过的记录
    pub skipped: usize,
}

/// 解析后的单条记录
#[derive(Debug)]
enum Record {
    Figure { handle: Handle, figure: Figure },
    Elevation { handle: Handle, elevation: Elevation },
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn parse_bool(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// 去掉旧格式中紧跟在句柄后的布尔值
///
/// 句柄为十六进制字符串，不会以 `True`/`False` 结尾。
fn strip_legacy_flag(raw: &str) -> &str {
    for suffix in ["true", "false"] {
        let split = raw.len().saturating_sub(suffix.len());
        if split > 0
            && raw.is_char_boundary(split)
            && raw[split..].eq_ignore_ascii_case(suffix)
        {
            return &raw[..split];
        }
    }
    raw
}

/// 句柄能否原样写入记录；只有填充句柄可以为空
fn check_handle(handle: &Handle, allow_empty: bool) -> Result<&str, FileError> {
    let text = handle.as_str();
    let empty_ok = allow_empty || !text.is_empty();
    if empty_ok && !text.contains(|c: char| c.is_whitespace() || c == ';') {
        Ok(text)
    } else {
        Err(FileError::InvalidHandle(text.to_string()))
    }
}

/// 以默认格式导出注册表
pub fn export_data(registry: &GeoRegistry) -> Result<String, FileError> {
    export_data_with(registry, HeaderStyle::default())
}

/// 导出注册表：先全部图形，再全部作业点
pub fn export_data_with(registry: &GeoRegistry, style: HeaderStyle) -> Result<String, FileError> {
    let mut output = String::new();

    for (handle, figure) in registry.figures() {
        check_handle(handle, false)?;
        check_handle(&figure.hatch, true)?;
        output.push_str(&format!(
            "{} {} {} {}\n",
            FIGURE_TAG, handle, figure.number, figure.hatch
        ));
        let members = figure
            .elevations()
            .iter()
            .map(|member| check_handle(member, false))
            .collect::<Result<Vec<_>, _>>()?;
        output.push_str(&members.join(";"));
        output.push('\n');
    }

    for (handle, elevation) in registry.elevations() {
        check_handle(handle, false)?;
        let flag = bool_text(elevation.zero_point);
        match style {
            HeaderStyle::Delimited => {
                output.push_str(&format!("{} {} {}\n", ELEVATION_TAG, handle, flag))
            }
            HeaderStyle::Legacy => {
                output.push_str(&format!("{} {}{}\n", ELEVATION_TAG, handle, flag))
            }
        }
        output.push_str(&format!(
            "{:.4} {:.4} {:.3} {:.4} {:.4} {}\n",
            elevation.existing_elevation,
            elevation.design_elevation,
            elevation.ground,
            elevation.position.northing,
            elevation.position.easting,
            flag
        ));
    }

    Ok(output)
}

/// 导出到文件
pub fn write_file(
    registry: &GeoRegistry,
    path: &Path,
    style: HeaderStyle,
) -> Result<(), FileError> {
    let text = export_data_with(registry, style)?;
    std::fs::write(path, text)?;

    tracing::info!(
        "Exported {} figures, {} elevations to {}",
        registry.figure_count(),
        registry.elevation_count(),
        path.display()
    );

    Ok(())
}

/// 从文本导入，已登记或文件内重复的句柄跳过
///
/// 任一记录无法解析时返回 `MalformedRecord`，注册表保持不变。
pub fn import_str(registry: &mut GeoRegistry, text: &str) -> Result<ImportSummary, FileError> {
    let records = parse_records(text)?;
    let mut summary = ImportSummary::default();

    for record in records {
        let (handle, added) = match record {
            Record::Figure { handle, figure } => {
                let added = registry.add_figure(handle.clone(), figure).is_ok();
                if added {
                    summary.figures += 1;
                }
                (handle, added)
            }
            Record::Elevation { handle, elevation } => {
                let added = registry.add_elevation(handle.clone(), elevation).is_ok();
                if added {
                    summary.elevations += 1;
                }
                (handle, added)
            }
        };

        if !added {
            tracing::debug!("Skipped duplicate handle {}", handle);
            summary.skipped += 1;
        }
    }

    Ok(summary)
}

/// 从文件导入
pub fn import_file(registry: &mut GeoRegistry, path: &Path) -> Result<ImportSummary, FileError> {
    if !path.exists() {
        return Err(FileError::FileNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let summary = import_str(registry, &text)?;

    tracing::info!(
        "Imported {} figures, {} elevations from {} ({} duplicates skipped)",
        summary.figures,
        summary.elevations,
        path.display(),
        summary.skipped
    );

    Ok(summary)
}

fn parse_records(text: &str) -> Result<Vec<Record>, FileError> {
    let mut records = Vec::new();
    // 行号从1开始
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

    while let Some((line_number, line)) = lines.next() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&tag) = tokens.first() else {
            continue;
        };

        match tag {
            FIGURE_TAG => {
                let (handle, number, hatch) = parse_figure_header(&tokens, line_number)?;
                let (body_number, body) = lines.next().ok_or_else(|| {
                    FileError::malformed(line_number, "figure record has no member line")
                })?;

                let members: Vec<Handle> = body
                    .split(';')
                    .map(str::trim)
                    .filter(|member| !member.is_empty())
                    .map(Handle::from)
                    .collect();
                let figure = Figure::new(members, number, hatch)
                    .map_err(|e| FileError::malformed(body_number, e.to_string()))?;

                records.push(Record::Figure { handle, figure });
            }
            ELEVATION_TAG => {
                let handle = parse_elevation_header(&tokens, line_number)?;
                let (body_number, body) = lines.next().ok_or_else(|| {
                    FileError::malformed(line_number, "elevation record has no value line")
                })?;
                let elevation = parse_elevation_values(body, body_number)?;

                records.push(Record::Elevation { handle, elevation });
            }
            _ => {}
        }
    }

    Ok(records)
}

fn parse_figure_header(tokens: &[&str], line: usize) -> Result<(Handle, u32, Handle), FileError> {
    let (handle, number, hatch) = match tokens {
        [_, handle, number] => (*handle, *number, ""),
        [_, handle, number, hatch, ..] => (*handle, *number, *hatch),
        _ => {
            return Err(FileError::malformed(
                line,
                "expected FIGURE <handle> <number> <hatch>",
            ))
        }
    };

    let number = number
        .parse::<u32>()
        .map_err(|_| FileError::malformed(line, format!("invalid figure number '{number}'")))?;

    Ok((Handle::from(handle), number, Handle::from(hatch)))
}

fn parse_elevation_header(tokens: &[&str], line: usize) -> Result<Handle, FileError> {
    match tokens {
        [_, handle, flag] => {
            if parse_bool(flag).is_none() {
                return Err(FileError::malformed(line, format!("invalid boolean '{flag}'")));
            }
            Ok(Handle::from(*handle))
        }
        [_, raw] => {
            let handle = strip_legacy_flag(raw);
            Ok(Handle::from(handle))
        }
        _ => Err(FileError::malformed(line, "expected ELEVATION <handle> <zeroPoint>")),
    }
}

fn parse_elevation_values(body: &str, line: usize) -> Result<Elevation, FileError> {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    if tokens.len() < 6 {
        return Err(FileError::malformed(
            line,
            format!("expected 6 values, found {}", tokens.len()),
        ));
    }

    let mut numbers = [0.0; 5];
    for (slot, token) in numbers.iter_mut().zip(&tokens) {
        *slot = token
            .parse::<f64>()
            .map_err(|_| FileError::malformed(line, format!("invalid number '{token}'")))?;
    }
    let [existing, design, ground, northing, easting] = numbers;

    let zero_point = parse_bool(tokens[5])
        .ok_or_else(|| FileError::malformed(line, format!("invalid boolean '{}'", tokens[5])))?;

    Ok(Elevation {
        position: Position::new(northing, easting),
        existing_elevation: existing,
        design_elevation: design,
        ground,
        zero_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> GeoRegistry {
        let mut registry = GeoRegistry::new();
        registry
            .add_elevation(
                "2A1".into(),
                Elevation::new(Position::new(1000.5, 2000.25), 101.2345, 101.8, 0.25),
            )
            .unwrap();
        registry
            .add_elevation(
                "2A2".into(),
                Elevation::new(Position::new(1000.5, 2010.25), 101.0, 101.5, 0.25),
            )
            .unwrap();
        registry
            .add_elevation("2A3".into(), Elevation::zero_point(Position::new(1010.5, 2010.25)))
            .unwrap();

        let members = vec!["2A1".into(), "2A2".into(), "2A3".into()];
        registry
            .add_figure("3F0".into(), Figure::new(members, 4, "3F1".into()).unwrap())
            .unwrap();
        registry
    }

    #[test]
    fn test_export_format() {
        let mut registry = GeoRegistry::new();
        registry
            .add_elevation(
                "A1".into(),
                Elevation::new(Position::new(10.0, 20.0), 100.0, 100.5, 0.25),
            )
            .unwrap();

        assert_eq!(
            export_data(&registry).unwrap(),
            "ELEVATION A1 False\n100.0000 100.5000 0.250 10.0000 20.0000 False\n"
        );
        assert_eq!(
            export_data_with(&registry, HeaderStyle::Legacy).unwrap(),
            "ELEVATION A1False\n100.0000 100.5000 0.250 10.0000 20.0000 False\n"
        );
    }

    #[test]
    fn test_export_figure_lines() {
        let text = export_data(&sample_registry()).unwrap();
        assert!(text.starts_with("FIGURE 3F0 4 3F1\n2A1;2A2;2A3\n"));
        assert!(text.contains("ELEVATION 2A3 True\n"));
    }

    #[test]
    fn test_export_rejects_unwritable_handles() {
        let path = std::env::temp_dir().join("cartogram_test_bad_handle.txt");
        std::fs::remove_file(&path).ok();

        for bad in ["A B", "A;B", ""] {
            let mut registry = GeoRegistry::new();
            registry
                .add_elevation(bad.into(), Elevation::zero_point(Position::new(0.0, 0.0)))
                .unwrap();

            assert!(matches!(
                export_data(&registry),
                Err(FileError::InvalidHandle(handle)) if handle == bad
            ));
            assert!(matches!(
                write_file(&registry, &path, HeaderStyle::Delimited),
                Err(FileError::InvalidHandle(_))
            ));
        }
        assert!(!path.exists());

        let mut registry = sample_registry();
        let members = vec!["2A1".into(), "2A2".into(), "2A 3".into()];
        registry
            .add_figure("3F9".into(), Figure::new(members, 5, "".into()).unwrap())
            .unwrap();
        assert!(matches!(
            export_data(&registry),
            Err(FileError::InvalidHandle(handle)) if handle == "2A 3"
        ));
    }

    #[test]
    fn test_export_keeps_empty_hatch() {
        let mut registry = sample_registry();
        registry.remove_figure(&"3F0".into());
        let members = vec!["2A1".into(), "2A2".into(), "2A3".into()];
        registry
            .add_figure("3F0".into(), Figure::new(members, 4, "".into()).unwrap())
            .unwrap();

        let text = export_data(&registry).unwrap();
        let mut imported = GeoRegistry::new();
        assert_eq!(import_str(&mut imported, &text).unwrap().figures, 1);
        assert_eq!(imported.figure(&"3F0".into()).unwrap().hatch.as_str(), "");
    }

    #[test]
    fn test_roundtrip() {
        let registry = sample_registry();
        let text = export_data(&registry).unwrap();

        let mut imported = GeoRegistry::new();
        let summary = import_str(&mut imported, &text).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                figures: 1,
                elevations: 3,
                skipped: 0
            }
        );

        let figure = imported.figure(&"3F0".into()).unwrap();
        assert_eq!(figure.number, 4);
        assert_eq!(figure.hatch, Handle::from("3F1"));
        assert_eq!(figure.elevations(), registry.figure(&"3F0".into()).unwrap().elevations());

        for (handle, expected) in registry.elevations() {
            let loaded = imported.elevation(handle).unwrap();
            assert!((loaded.existing_elevation - expected.existing_elevation).abs() < 5e-5);
            assert!((loaded.design_elevation - expected.design_elevation).abs() < 5e-5);
            assert!((loaded.ground - expected.ground).abs() < 5e-4);
            assert!((loaded.position.northing - expected.position.northing).abs() < 5e-5);
            assert!((loaded.position.easting - expected.position.easting).abs() < 5e-5);
            assert_eq!(loaded.zero_point, expected.zero_point);
        }
    }

    #[test]
    fn test_legacy_and_bare_headers() {
        let text = "ELEVATION 1B2True\n0 0 0 1 2 True\n\
                    ELEVATION 1B3false\n100 101 0.1 3 4 false\n\
                    ELEVATION 1B4\n100 99 0 5 6 FALSE\n";

        let mut registry = GeoRegistry::new();
        let summary = import_str(&mut registry, text).unwrap();

        assert_eq!(summary.elevations, 3);
        assert!(registry.elevation(&"1B2".into()).unwrap().zero_point);
        assert!(!registry.elevation(&"1B3".into()).unwrap().zero_point);
        assert!(registry.elevation(&"1B4".into()).unwrap().is_cut());
    }

    #[test]
    fn test_unknown_and_blank_lines_ignored() {
        let text = "\nCOMMENT something\n\nELEVATION A1 False\n1 2 0 3 4 False\n\n";
        let mut registry = GeoRegistry::new();
        let summary = import_str(&mut registry, text).unwrap();
        assert_eq!(summary.elevations, 1);
    }

    #[test]
    fn test_duplicates_skipped() {
        let mut registry = sample_registry();
        let text = export_data(&registry).unwrap();

        let summary = import_str(&mut registry, &text).unwrap();
        assert_eq!(summary.figures, 0);
        assert_eq!(summary.elevations, 0);
        assert_eq!(summary.skipped, 4);

        let repeated = "ELEVATION A1 False\n1 2 0 3 4 False\nELEVATION A1 True\n0 0 0 0 0 True\n";
        let mut fresh = GeoRegistry::new();
        let summary = import_str(&mut fresh, repeated).unwrap();
        assert_eq!(summary.elevations, 1);
        assert_eq!(summary.skipped, 1);
        assert!(!fresh.elevation(&"A1".into()).unwrap().zero_point);
    }

    #[test]
    fn test_malformed_record_leaves_registry_untouched() {
        let text = "ELEVATION A1 False\n1 2 0 3 4 False\nELEVATION A2 False\n1 x 0 3 4 False\n";
        let mut registry = GeoRegistry::new();

        let result = import_str(&mut registry, text);
        assert!(matches!(
            result,
            Err(FileError::MalformedRecord { line: 4, .. })
        ));
        assert_eq!(registry.elevation_count(), 0);
    }

    #[test]
    fn test_malformed_figures() {
        let mut registry = GeoRegistry::new();

        let short = "FIGURE F1 1 H1\nA;B\n";
        assert!(matches!(
            import_str(&mut registry, short),
            Err(FileError::MalformedRecord { line: 2, .. })
        ));

        let bad_number = "FIGURE F1 one H1\nA;B;C\n";
        assert!(matches!(
            import_str(&mut registry, bad_number),
            Err(FileError::MalformedRecord { line: 1, .. })
        ));

        let truncated = "FIGURE F1 1 H1";
        assert!(matches!(
            import_str(&mut registry, truncated),
            Err(FileError::MalformedRecord { line: 1, .. })
        ));

        assert_eq!(registry.figure_count(), 0);
    }

    #[test]
    fn test_file_roundtrip() {
        let file_path = std::env::temp_dir().join("cartogram_test_data.txt");
        let registry = sample_registry();

        write_file(&registry, &file_path, HeaderStyle::Legacy).expect("Failed to write");

        let mut imported = GeoRegistry::new();
        let summary = import_file(&mut imported, &file_path).expect("Failed to import");
        assert_eq!(summary.figures, 1);
        assert_eq!(summary.elevations, 3);
        assert!(imported.elevation(&"2A3".into()).unwrap().zero_point);

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_missing_file() {
        let file_path = std::env::temp_dir().join("cartogram_no_such_data.txt");
        let mut registry = GeoRegistry::new();
        assert!(matches!(
            import_file(&mut registry, &file_path),
            Err(FileError::FileNotFound(_))
        ));
    }
}
