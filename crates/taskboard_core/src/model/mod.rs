mod filter;
mod task;

pub use filter::TaskFilter;
pub use task::{Task, TaskStatus};
