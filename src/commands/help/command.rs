use crate::commands::command::Command;
use crate::commands::context::CommandContext;
use crate::core::prelude::*;

#[derive(Debug, Default)]
pub struct HelpCommand;

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Show all available commands"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "help" | "?" | "commands")
    }

    async fn execute(&self, ctx: &CommandContext, args: &[&str]) -> Result<String> {
        match args.first() {
            None => Ok(self.create_formatted_list(ctx.catalog())),
            Some(&command_name) => Ok(self.show_command_help(command_name, ctx.catalog())),
        }
    }

    fn priority(&self) -> u8 {
        95
    }
}

impl HelpCommand {
    fn create_formatted_list(&self, catalog: &[(String, String)]) -> String {
        if catalog.is_empty() {
            return "No commands available.".to_string();
        }

        let width = catalog
            .iter()
            .map(|(usage, _)| usage.chars().count())
            .max()
            .unwrap_or(0);

        let mut result = String::from("Available commands:\n\n");
        for (usage, description) in catalog {
            result.push_str(&format!("  {:width$}  {}\n", usage, description, width = width));
        }
        result.push_str("\nUse 'help <command>' for a single entry.");
        result
    }

    fn show_command_help(&self, command_name: &str, catalog: &[(String, String)]) -> String {
        let wanted = command_name.trim().to_lowercase();
        catalog
            .iter()
            .find(|(usage, _)| usage.split_whitespace().next() == Some(wanted.as_str()))
            .map(|(usage, description)| format!("{}\n  {}", usage, description))
            .unwrap_or_else(|| format!("Command '{}' not found.", command_name))
    }
}
