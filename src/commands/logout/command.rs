use crate::commands::command::Command;
use crate::commands::context::CommandContext;
use crate::core::prelude::*;
use crate::messages::RefreshOutcome;

#[derive(Debug)]
pub struct LogoutCommand;

#[async_trait::async_trait]
impl Command for LogoutCommand {
    fn name(&self) -> &'static str {
        "logout"
    }

    fn description(&self) -> &'static str {
        "Clear session credentials and refresh message tables"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "logout" | "signout")
    }

    async fn execute(&self, ctx: &CommandContext, _args: &[&str]) -> Result<String> {
        let refresh = ctx.service().logout();

        // Awaited so a one-shot run does not exit and kill the refresh task.
        let note = match refresh.await {
            Ok(RefreshOutcome::Refreshed { codes }) => {
                ctx.invalidate_tables().await;
                format!("message tables refreshed ({} codes)", codes)
            }
            Ok(RefreshOutcome::Failed(reason)) => {
                format!("message refresh failed: {}", reason)
            }
            Err(e) => {
                log::error!("Logout refresh task aborted: {}", e);
                "message refresh aborted".to_string()
            }
        };

        Ok(format!("Logged out, {}", note))
    }

    fn priority(&self) -> u8 {
        60
    }
}
