// src/commands/handler.rs
use super::context::CommandContext;
use super::registry::CommandRegistry;
use crate::core::constants::SIG_EXIT;
use crate::core::helpers::preview;
use crate::core::prelude::*;

#[derive(Debug)]
pub struct CommandResult {
    pub message: String,
    pub success: bool,
    pub should_exit: bool,
}

impl CommandResult {
    fn failed(message: String) -> Self {
        Self {
            message,
            success: false,
            should_exit: false,
        }
    }
}

pub struct CommandHandler {
    registry: CommandRegistry,
    context: CommandContext,
}

impl CommandHandler {
    pub fn new(service: MessageService) -> Self {
        Self::with_registry(crate::create_default_registry(), service)
    }

    pub fn with_registry(registry: CommandRegistry, service: MessageService) -> Self {
        let catalog = registry
            .list_commands()
            .into_iter()
            .map(|(usage, description)| (usage.to_string(), description.to_string()))
            .collect();

        Self {
            registry,
            context: CommandContext::new(service).with_catalog(catalog),
        }
    }

    pub async fn handle_input(&self, input: &str) -> CommandResult {
        let input = input.trim();
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            return CommandResult::failed(String::new());
        }

        log::debug!("CommandHandler processing: '{}'", input);

        match self.registry.execute(&self.context, parts[0], &parts[1..]).await {
            Some(Ok(msg)) => {
                log::debug!(
                    "Command returned {} chars: '{}'",
                    msg.chars().count(),
                    preview(&msg, 100)
                );

                if let Some(rest) = msg.strip_prefix(SIG_EXIT) {
                    return CommandResult {
                        message: rest.to_string(),
                        success: true,
                        should_exit: true,
                    };
                }

                CommandResult {
                    message: msg,
                    success: true,
                    should_exit: false,
                }
            }
            Some(Err(e)) => {
                log::error!("Command error: {}", e);
                CommandResult::failed(e.to_string())
            }
            None => {
                log::warn!("Unknown command: {}", input);
                CommandResult::failed(format!(
                    "Unknown command: '{}'. Type 'help' for a list of commands.",
                    parts[0]
                ))
            }
        }
    }

    pub fn add_command<T: crate::commands::command::Command>(&mut self, command: T) {
        self.registry.register(command);
    }

    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        self.registry.list_commands()
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    pub fn debug_info(&self) -> String {
        self.registry.debug_info()
    }
}
