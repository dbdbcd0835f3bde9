use crate::commands::command::Command;
use crate::commands::context::CommandContext;
use crate::core::prelude::*;

#[derive(Debug)]
pub struct TablesCommand;

#[async_trait::async_trait]
impl Command for TablesCommand {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn description(&self) -> &'static str {
        "Show loaded message tables, or every entry of one category"
    }

    fn usage(&self) -> &'static str {
        "tables [error|validation|information]"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "tables" | "table" | "ls")
    }

    async fn execute(&self, ctx: &CommandContext, args: &[&str]) -> Result<String> {
        let tables = ctx.tables().await;

        match args.first() {
            None => {
                let mut out = String::from("Message tables:\n");
                for category in Category::ALL {
                    out.push_str(&format!(
                        "  {:12} {} codes\n",
                        category.to_string(),
                        tables.get(category).len()
                    ));
                }
                out.push_str(&format!("  {:12} {} codes", "total", tables.total_len()));
                Ok(out)
            }
            Some(raw) => {
                let category: Category = raw.parse()?;
                let table = tables.get(category);
                if table.is_empty() {
                    return Ok(format!("No {} messages loaded.", category));
                }

                let lines: Vec<String> = table
                    .iter()
                    .map(|(code, text)| format!("  {:8} {}", code, text))
                    .collect();
                Ok(format!(
                    "{} messages ({}):\n{}",
                    category,
                    table.len(),
                    lines.join("\n")
                ))
            }
        }
    }

    fn priority(&self) -> u8 {
        70
    }
}
