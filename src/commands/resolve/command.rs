use crate::commands::command::Command;
use crate::commands::context::CommandContext;
use crate::core::prelude::*;

/// `resolve <CODE> [category]`: text as the user would see it.
#[derive(Debug)]
pub struct ResolveCommand;

#[async_trait::async_trait]
impl Command for ResolveCommand {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Resolve a message code to its display text"
    }

    fn usage(&self) -> &'static str {
        "resolve <CODE> [error|validation|information]"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "resolve" | "res" | "msg")
    }

    async fn execute(&self, ctx: &CommandContext, args: &[&str]) -> Result<String> {
        let code = args
            .first()
            .ok_or_else(|| AppError::Validation(format!("Usage: {}", self.usage())))?;

        let category = match args.get(1) {
            Some(raw) => raw.parse::<Category>()?,
            None => Category::infer(code).ok_or_else(|| {
                AppError::Validation(format!(
                    "Cannot tell the category of '{}', pass it explicitly",
                    code
                ))
            })?,
        };

        let tables = ctx.tables().await;
        let text = ctx.service().display_text(&tables, category, code).await;
        Ok(format!("{} {}: {}", category, code.trim().to_uppercase(), text))
    }

    fn priority(&self) -> u8 {
        80
    }
}
