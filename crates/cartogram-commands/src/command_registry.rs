//! 命令注册表
//!
//! 支持完整命令、短命令和 Tab 补全，并按名称执行命令

use crate::actions::execute;
use crate::command::CommandType;
use crate::error::{CommandError, CommandResult};
use crate::session::{Services, Session};
use std::collections::HashMap;

/// 命令注册表
///
/// 管理所有命令和短命令的映射
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    /// 完整命令 -> CommandType
    main_commands: HashMap<String, CommandType>,
    /// 短命令 -> CommandType
    short_commands: HashMap<String, CommandType>,
}

impl CommandRegistry {
    /// 创建注册了全部命令的注册表
    pub fn new() -> Self {
        let mut registry = Self {
            main_commands: HashMap::new(),
            short_commands: HashMap::new(),
        };

        for command in CommandType::ALL {
            registry.register(command, command.command(), command.shortcuts());
        }

        registry
    }

    /// 注册命令
    pub fn register(&mut self, command: CommandType, full_cmd: &str, shortcuts: &[&str]) {
        self.main_commands.insert(full_cmd.to_uppercase(), command);

        for shortcut in shortcuts {
            self.short_commands.insert(shortcut.to_uppercase(), command);
        }
    }

    /// 查找命令：先完整命令后短命令，不区分大小写
    pub fn lookup(&self, input: &str) -> Option<CommandType> {
        let input_upper = input.trim().to_uppercase();

        if let Some(&command) = self.main_commands.get(&input_upper) {
            return Some(command);
        }

        self.short_commands.get(&input_upper).copied()
    }

    /// Tab 补全
    ///
    /// 返回所有以 prefix 开头的完整命令
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let prefix_upper = prefix.to_uppercase();
        let mut results: Vec<String> = self
            .main_commands
            .keys()
            .filter(|cmd| cmd.starts_with(&prefix_upper))
            .cloned()
            .collect();

        results.sort();
        results
    }

    /// 按命令行输入执行命令
    pub fn run(
        &self,
        input: &str,
        session: &mut Session,
        services: &mut Services<'_>,
    ) -> CommandResult<()> {
        let command = self
            .lookup(input)
            .ok_or_else(|| CommandError::UnknownCommand(input.trim().to_string()))?;
        execute(command, session, services)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
