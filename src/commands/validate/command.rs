use crate::commands::command::Command;
use crate::commands::context::CommandContext;
use crate::core::prelude::*;
use crate::validation::{check_password_confirmation, validate_form};

const CONFIRM_FIELDS: &[&str] = &["confirm_password", "confirmPassword"];

/// `validate field=value ...`: runs the form rules and prints resolved messages.
#[derive(Debug)]
pub struct ValidateCommand;

impl ValidateCommand {
    fn parse_pairs<'a>(&self, args: &[&'a str]) -> Result<Vec<(&'a str, &'a str)>> {
        args.iter()
            .map(|arg| {
                arg.split_once('=').ok_or_else(|| {
                    AppError::Validation(format!("Expected field=value, got '{}'", arg))
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl Command for ValidateCommand {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Validate form fields and show the resolved messages"
    }

    fn usage(&self) -> &'static str {
        "validate <field>=<value> ..."
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "validate" | "check")
    }

    async fn execute(&self, ctx: &CommandContext, args: &[&str]) -> Result<String> {
        if args.is_empty() {
            return Err(AppError::Validation(format!("Usage: {}", self.usage())));
        }

        let pairs = self.parse_pairs(args)?;
        let (confirm, fields): (Vec<_>, Vec<_>) = pairs
            .into_iter()
            .partition(|(name, _)| CONFIRM_FIELDS.contains(name));

        let tables = ctx.tables().await;
        let report = validate_form(ctx.service(), &tables, &fields).await?;

        let mut lines: Vec<String> = report
            .errors()
            .map(|(field, text)| format!("  {}: {}", field, text))
            .collect();

        if let Some(&(name, value)) = confirm.first() {
            let password = fields
                .iter()
                .find(|(field, _)| matches!(*field, "password" | "new_password"))
                .map(|(_, v)| *v)
                .unwrap_or_default();
            if let Some(found) = check_password_confirmation(password, value) {
                let text = ctx
                    .service()
                    .display_text(&tables, found.category, found.code)
                    .await;
                lines.push(format!("  {}: {}", name, text));
            }
        }

        if lines.is_empty() {
            Ok(format!("All {} field(s) valid.", args.len()))
        } else {
            Err(AppError::Validation(format!(
                "{} field(s) invalid:\n{}",
                lines.len(),
                lines.join("\n")
            )))
        }
    }

    fn priority(&self) -> u8 {
        70
    }
}
