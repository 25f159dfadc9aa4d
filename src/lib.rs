pub mod config;
pub mod errors;
pub mod parser;
pub mod queue;
pub mod runner;
pub mod serializer;
pub mod service;

pub use queue::{FifoQueue, Queue};
