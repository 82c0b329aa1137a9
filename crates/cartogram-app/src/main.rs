//! Cartogram 命令行程序
//!
//! 用法：
//! - `cartogram report <data> [--config <json>]`: 按分档汇总全部图形的土方量
//! - `cartogram check <data> [--prune <out>]`: 检查图形状态，可删除无效图形后另存
//! - `cartogram dxf <data> <out.dxf> [--config <json>]`: 输出DXF图纸
//! - `cartogram run <data> <command> [--file <path>]`: 以全部图形和作业点为选择集执行命令
//! - `cartogram commands [prefix]`: 列出以 prefix 开头的命令

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cartogram_commands::{CommandRegistry, CommandType, Services, Session};
use cartogram_core::prelude::*;
use cartogram_file::{import_file, load_config, write_file, DxfSheet, HeaderStyle};

const USAGE: &str = "usage: cartogram <report|check|dxf|run|commands> [data] [out|command] \
                     [--config <json>] [--prune <out>] [--file <path>]";

/// 命令行参数
#[derive(Debug, Default)]
struct Args {
    command: String,
    positional: Vec<String>,
    config: Option<PathBuf>,
    prune: Option<PathBuf>,
    file: Option<PathBuf>,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> Result<Self> {
        let mut args = Args::default();
        let mut positional = Vec::new();

        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--config" => {
                    args.config = Some(raw.next().context("--config needs a path")?.into())
                }
                "--prune" => args.prune = Some(raw.next().context("--prune needs a path")?.into()),
                "--file" => args.file = Some(raw.next().context("--file needs a path")?.into()),
                "-h" | "--help" => bail!(USAGE),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        args.command = positional.next().context(USAGE)?;
        args.positional = positional.collect();
        Ok(args)
    }

    fn data(&self) -> Result<PathBuf> {
        let data = self.positional.first().context(USAGE)?;
        Ok(PathBuf::from(data))
    }

    /// 数据文件之后的第二个参数
    fn target(&self, what: &str) -> Result<&str> {
        self.positional
            .get(1)
            .map(String::as_str)
            .with_context(|| format!("{} needs {}", self.command, what))
    }
}

/// 非交互提示：选择集固定，数值取默认值，路径取 `--file`，不拾取点和曲面
struct BatchPrompt {
    selection: Vec<Handle>,
    file: Option<PathBuf>,
}

impl PromptService for BatchPrompt {
    fn select_markers(&mut self, _message: &str) -> Option<Vec<Handle>> {
        Some(self.selection.clone())
    }

    fn prompt_number(&mut self, _message: &str, default: f64) -> Option<f64> {
        Some(default)
    }

    fn prompt_integer(&mut self, _message: &str, default: i64) -> Option<i64> {
        Some(default)
    }

    fn prompt_point(&mut self, _message: &str) -> Option<Point2> {
        None
    }

    fn select_surface(&mut self, _message: &str) -> Option<Handle> {
        None
    }

    fn prompt_path(&mut self, _message: &str) -> Option<PathBuf> {
        self.file.clone()
    }
}

/// 没有可用曲面
struct NoSurfaces;

impl SurfaceSampler for NoSurfaces {
    fn sample_elevation(&self, _surface: &Handle, _x: f64, _y: f64) -> Option<f64> {
        None
    }
}

fn load_session(args: &Args) -> Result<Session> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DesignConfig::default(),
    };

    let data = args.data()?;
    let mut session = Session::new(config);
    import_file(&mut session.registry, &data)
        .with_context(|| format!("Failed to import {}", data.display()))?;
    Ok(session)
}

fn sorted_figures(registry: &GeoRegistry) -> Vec<Handle> {
    let mut handles: Vec<Handle> = registry.figures().map(|(handle, _)| handle.clone()).collect();
    handles.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    handles
}

/// 全部图形在前，作业点在后，各自按句柄排序
fn batch_selection(registry: &GeoRegistry) -> Vec<Handle> {
    let mut elevations: Vec<Handle> =
        registry.elevations().map(|(handle, _)| handle.clone()).collect();
    elevations.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    let mut selection = sorted_figures(registry);
    selection.extend(elevations);
    selection
}

/// 通过命令注册表执行一条命令，标记写入一张空白图纸
fn run_command(session: &mut Session, name: &str, file: Option<PathBuf>) -> Result<DxfSheet> {
    let registry = CommandRegistry::new();

    let mut sheet = DxfSheet::new();
    let mut prompt = BatchPrompt {
        selection: batch_selection(&session.registry),
        file,
    };
    let mut sink = TracingSink;
    let mut services = Services::new(&mut sheet, &mut prompt, &NoSurfaces, &mut sink);

    registry
        .run(name, session, &mut services)
        .with_context(|| format!("Command {} failed", name.trim()))?;
    Ok(sheet)
}

fn report(args: &Args) -> Result<()> {
    let mut session = load_session(args)?;
    run_command(&mut session, CommandType::VolumeReport.command(), None)?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut session = load_session(args)?;
    let name = args.target("a command name")?;

    let sheet = run_command(&mut session, name, args.file.clone())?;
    info!(
        "{} finished: {} elevations, {} figures, {} new markers",
        name,
        session.registry.elevation_count(),
        session.registry.figure_count(),
        sheet.len()
    );
    Ok(())
}

fn commands(args: &Args) {
    let prefix = args.positional.first().map(String::as_str).unwrap_or("");
    for name in CommandRegistry::new().complete(prefix) {
        println!("{name}");
    }
}

fn check(args: &Args) -> Result<()> {
    let mut session = load_session(args)?;
    let mut invalid = Vec::new();

    for handle in sorted_figures(&session.registry) {
        let state = session.registry.figure_data(&handle)?.state();
        if state != FigureState::ValidSingle {
            warn!("Figure {} is {:?}", handle, state);
            invalid.push(handle);
        }
    }

    info!(
        "{} elevations, {} figures, {} invalid",
        session.registry.elevation_count(),
        session.registry.figure_count(),
        invalid.len()
    );

    if let Some(out) = &args.prune {
        for handle in &invalid {
            session.registry.remove_figure(handle);
        }
        write_file(&session.registry, out, HeaderStyle::Delimited)?;
    }

    Ok(())
}

fn dxf(args: &Args) -> Result<()> {
    let session = load_session(args)?;
    let output = PathBuf::from(args.target("an output path")?);

    let mut sheet = DxfSheet::new();
    sheet.render_registry(&session.registry, &session.config);
    sheet.save(&output)?;
    Ok(())
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    let args = Args::parse(std::env::args().skip(1))?;
    info!("Running {} {:?}", args.command, args.positional);

    match args.command.as_str() {
        "report" => report(&args),
        "check" => check(&args),
        "dxf" => dxf(&args),
        "run" => run(&args),
        "commands" => {
            commands(&args);
            Ok(())
        }
        other => bail!("Unknown command '{}'\n{}", other, USAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    fn fill_session() -> Session {
        let mut session = Session::new(DesignConfig::default());
        let corners = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)];
        let mut members = Vec::new();

        for (i, (northing, easting)) in corners.into_iter().enumerate() {
            let handle = Handle::from(format!("E{i}"));
            let elevation = Elevation::new(Position::new(northing, easting), 100.0, 100.3, 0.0);
            session.registry.add_elevation(handle.clone(), elevation).unwrap();
            members.push(handle);
        }

        let figure = Figure::new(members, 1, Handle::from("H1")).unwrap();
        session.registry.add_figure(Handle::from("F1"), figure).unwrap();
        session
    }

    #[test]
    fn test_parse_args() {
        let args = parse(&["dxf", "data.txt", "out.dxf", "--config", "cfg.json"]).unwrap();
        assert_eq!(args.command, "dxf");
        assert_eq!(args.data().unwrap(), PathBuf::from("data.txt"));
        assert_eq!(args.target("an output path").unwrap(), "out.dxf");
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));

        let args = parse(&["check", "--prune", "clean.txt", "data.txt"]).unwrap();
        assert_eq!(args.prune, Some(PathBuf::from("clean.txt")));
        assert_eq!(args.data().unwrap(), PathBuf::from("data.txt"));

        let args = parse(&["run", "data.txt", "cg_exportdata", "--file", "out.txt"]).unwrap();
        assert_eq!(args.target("a command name").unwrap(), "cg_exportdata");
        assert_eq!(args.file, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["report"]).unwrap().data().is_err());
        assert!(parse(&["run", "data.txt"]).unwrap().target("a command name").is_err());
        assert!(parse(&["report", "data.txt", "--config"]).is_err());
        assert!(parse(&["--help"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_batch_selection_puts_figures_first() {
        let session = fill_session();
        let selection = batch_selection(&session.registry);

        let names: Vec<&str> = selection.iter().map(Handle::as_str).collect();
        assert_eq!(names, vec!["F1", "E0", "E1", "E2", "E3"]);
    }

    #[test]
    fn test_run_command_through_registry() {
        let mut session = fill_session();

        // 短命令与完整命令都经注册表解析
        assert!(run_command(&mut session, "vr", None).is_ok());
        assert!(run_command(&mut session, "CG_GETVOLUMEREPORT", None).is_ok());

        let err = run_command(&mut session, "bogus", None).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_run_export_writes_file() {
        let mut session = fill_session();
        let path = std::env::temp_dir().join("cartogram_app_export.txt");

        run_command(&mut session, "CG_EXPORTDATA", Some(path.clone())).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("F1"));
        std::fs::remove_file(&path).ok();
    }
}
