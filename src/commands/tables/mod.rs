pub mod command;

pub use command::TablesCommand;
