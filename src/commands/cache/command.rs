use crate::commands::command::Command;
use crate::commands::context::CommandContext;
use crate::core::helpers::preview;
use crate::core::prelude::*;

#[derive(Debug)]
pub struct CacheCommand;

#[async_trait::async_trait]
impl Command for CacheCommand {
    fn name(&self) -> &'static str {
        "cache"
    }

    fn description(&self) -> &'static str {
        "Inspect or clear the persisted message cache"
    }

    fn usage(&self) -> &'static str {
        "cache [keys|get <key>|clear]"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "cache")
    }

    async fn execute(&self, ctx: &CommandContext, args: &[&str]) -> Result<String> {
        let store = ctx.service().store();

        match args.first().map(|s| s.to_lowercase()).as_deref() {
            None | Some("keys") => {
                let keys = store.keys()?;
                if keys.is_empty() {
                    return Ok("Cache is empty.".to_string());
                }
                Ok(format!("{} cached keys:\n  {}", keys.len(), keys.join("\n  ")))
            }
            Some("get") => {
                let key = args
                    .get(1)
                    .ok_or_else(|| AppError::Validation("Usage: cache get <key>".to_string()))?;
                match store.get(key)? {
                    Some(value) => Ok(format!("{} = {}", key, preview(&value, 200))),
                    None => Ok(format!("{} is not cached", key)),
                }
            }
            Some("clear") => {
                store.clear()?;
                ctx.invalidate_tables().await;
                log::info!("Message cache cleared");
                Ok("Cache cleared.".to_string())
            }
            Some(other) => Err(AppError::Validation(format!(
                "Unknown cache action '{}'. Usage: {}",
                other,
                self.usage()
            ))),
        }
    }

    fn priority(&self) -> u8 {
        50
    }
}
