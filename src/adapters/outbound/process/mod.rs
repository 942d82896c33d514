/// Process adapters - running commands inside an image root
mod executor;

pub use executor::{ExecutionMode, Executor, ExecutorConfig};
