use std::collections::HashMap;

pub mod category;
pub mod config;
pub mod expense;
pub mod system;

use crate::cli::core::{CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(category::definitions());
    commands.extend(expense::definitions());
    commands.extend(config::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    pub subcommands: &'static [&'static str],
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
            subcommands: &[],
        }
    }

    /// Subcommands offered by tab completion after the command name.
    pub fn with_subcommands(mut self, subcommands: &'static [&'static str]) -> Self {
        self.subcommands = subcommands;
        self
    }
}

/// Completion candidates for the argument that follows `command subcommand`.
pub(crate) fn argument_candidates(command: &str, subcommand: &str) -> Vec<&'static str> {
    match (command, subcommand) {
        ("expense", "set") => expense::FIELDS.to_vec(),
        ("config", "set") => crate::config::CONFIG_KEYS.to_vec(),
        _ => Vec::new(),
    }
}

/// Completion candidates for a field value, e.g. `expense set payment <value>`.
pub(crate) fn value_candidates(command: &str, subcommand: &str, field: &str) -> Vec<&'static str> {
    match (command, subcommand, field) {
        ("expense", "set", "payment") => expense::payment_keys(),
        ("config", "set", "screen_reader_mode" | "high_contrast_mode" | "quiet_mode") => {
            vec!["on", "off"]
        }
        _ => Vec::new(),
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}
