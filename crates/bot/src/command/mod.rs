//! Command module — parsing inbound chat commands and dispatching them.

pub mod model;
pub mod dispatch;

pub use model::{Command, CommandName, LifecycleAction};
pub use dispatch::CommandDispatcher;
