use super::context::CommandContext;
use crate::core::prelude::*;

#[async_trait::async_trait]
pub trait Command: Send + Sync + std::fmt::Debug + 'static {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn matches(&self, command: &str) -> bool;

    fn usage(&self) -> &'static str {
        self.name()
    }

    async fn execute(&self, ctx: &CommandContext, args: &[&str]) -> Result<String>;

    fn priority(&self) -> u8 {
        50
    }
    fn is_available(&self) -> bool {
        true
    }
}
