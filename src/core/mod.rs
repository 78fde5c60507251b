pub mod action;
pub mod command;
pub mod context;
pub mod module;

pub use action::{Action, NavigateTarget, NotifyLevel};
pub use command::{parse_command, Command, PageStep};
pub use context::Context;
pub use module::Module;
