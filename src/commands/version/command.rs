use crate::commands::command::Command;
use crate::commands::context::CommandContext;
use crate::core::constants::{APP_TITLE, VERSION};
use crate::core::prelude::*;

#[derive(Debug)]
pub struct VersionCommand;

#[async_trait::async_trait]
impl Command for VersionCommand {
    fn name(&self) -> &'static str {
        "version"
    }

    fn description(&self) -> &'static str {
        "Show application version"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "version" | "ver")
    }

    async fn execute(&self, _ctx: &CommandContext, _args: &[&str]) -> Result<String> {
        Ok(format!("{} v{}", APP_TITLE, VERSION))
    }

    fn priority(&self) -> u8 {
        40
    }
}
