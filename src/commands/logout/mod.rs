pub mod command;

pub use command::LogoutCommand;
