use crate::commands::command::Command;
use crate::commands::context::CommandContext;
use crate::core::prelude::*;
use crate::messages::RefreshOutcome;

#[derive(Debug)]
pub struct RefreshCommand;

#[async_trait::async_trait]
impl Command for RefreshCommand {
    fn name(&self) -> &'static str {
        "refresh"
    }

    fn description(&self) -> &'static str {
        "Fetch all message tables from the backend and overwrite the cache"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "refresh" | "reload")
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[&str]) -> Result<String> {
        match ctx.service().refresh_on_logout().await {
            RefreshOutcome::Refreshed { codes } => {
                ctx.invalidate_tables().await;
                Ok(format!("Message tables refreshed ({} codes)", codes))
            }
            RefreshOutcome::Failed(reason) => Err(AppError::Http(format!(
                "Refresh failed, cached tables kept: {}",
                reason
            ))),
        }
    }

    fn priority(&self) -> u8 {
        60
    }
}
