use crate::commands::command::Command;
use crate::commands::context::CommandContext;
use crate::core::constants::SIG_EXIT;
use crate::core::prelude::*;

#[derive(Debug)]
pub struct ExitCommand;

#[async_trait::async_trait]
impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exit the application"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "exit" | "quit" | "q")
    }

    async fn execute(&self, _ctx: &CommandContext, _args: &[&str]) -> Result<String> {
        Ok(format!("{}Bye.", SIG_EXIT))
    }

    fn priority(&self) -> u8 {
        100
    }
}
