//! Side-effecting operations: configuration, process execution, artifacts.

pub mod artifact;
pub mod config;
pub mod invoker;
pub mod process;
pub mod source;
