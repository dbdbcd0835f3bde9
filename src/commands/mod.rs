// src/commands/mod.rs
//! Line-oriented commands over the message service.

pub mod cache;
pub mod command;
pub mod context;
pub mod exit;
pub mod handler;
pub mod help;
pub mod logout;
pub mod refresh;
pub mod registry;
pub mod resolve;
pub mod tables;
pub mod validate;
pub mod version;

pub use command::Command;
pub use context::CommandContext;
pub use handler::{CommandHandler, CommandResult};
pub use registry::CommandRegistry;
