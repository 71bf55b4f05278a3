pub mod config;
pub mod session;
pub mod task;

pub use config::Config;
pub use session::{Reply, Session};
pub use task::{Command, Storage, Task, TaskKind, TaskList};
