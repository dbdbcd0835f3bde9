#[macro_export]
macro_rules! impl_default {
    ($type:ty, $body:expr) => {
        impl Default for $type {
            fn default() -> Self {
                $body
            }
        }
    };
}

#[macro_export]
macro_rules! matches_exact {
    ($cmd:expr, $($pattern:literal)|+) => {
        matches!($cmd.trim().to_lowercase().as_str(), $($pattern)|+)
    };
}

// Module definitions
pub mod commands;
pub mod core;
pub mod messages;
pub mod sequencer;
pub mod setup;
pub mod storage;
pub mod validation;

// Essential re-exports
pub use commands::{Command, CommandHandler, CommandRegistry, CommandResult};
pub use core::config::Config;
pub use core::error::{AppError, Result};
pub use messages::{Category, MessageService, MessageTables, MissingPolicy};
pub use sequencer::LookupSequencer;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

pub fn create_default_registry() -> CommandRegistry {
    use commands::{
        cache::CacheCommand, exit::ExitCommand, help::HelpCommand, logout::LogoutCommand,
        refresh::RefreshCommand, resolve::ResolveCommand, tables::TablesCommand,
        validate::ValidateCommand, version::VersionCommand,
    };

    let mut registry = CommandRegistry::new();

    registry.register(ExitCommand);
    registry.register(HelpCommand::new());
    registry.register(ResolveCommand);
    registry.register(TablesCommand);
    registry.register(ValidateCommand);
    registry.register(RefreshCommand);
    registry.register(LogoutCommand);
    registry.register(CacheCommand);
    registry.register(VersionCommand);

    registry.initialize();
    registry
}

/// Runs one command line, or an interactive prompt when `args` is empty.
pub async fn run(args: &[String]) -> Result<()> {
    let config = Config::load().await?;
    run_with_config(config, args).await
}

pub async fn run_with_config(config: Config, args: &[String]) -> Result<()> {
    let service = MessageService::from_config(&config)?;
    let handler = CommandHandler::new(service);

    if !args.is_empty() {
        let result = handler.handle_input(&args.join(" ")).await;
        return print_result(&result);
    }

    run_prompt(&handler).await
}

async fn run_prompt(handler: &CommandHandler) -> Result<()> {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            log::debug!("stdin closed, leaving prompt");
            return Ok(());
        };

        let result = handler.handle_input(&line).await;
        if !result.message.is_empty() {
            if result.success {
                println!("{}", result.message);
            } else {
                eprintln!("{}", result.message);
            }
        }
        if result.should_exit {
            return Ok(());
        }
    }
}

fn print_result(result: &CommandResult) -> Result<()> {
    if result.success {
        if !result.message.is_empty() {
            println!("{}", result.message);
        }
        Ok(())
    } else {
        Err(AppError::Validation(result.message.clone()))
    }
}

pub async fn load_config() -> Result<Config> {
    Config::load().await
}
