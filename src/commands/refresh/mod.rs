pub mod command;

pub use command::RefreshCommand;
