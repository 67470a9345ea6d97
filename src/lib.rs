pub mod cli;
pub mod config;
pub mod coordinator;
pub mod food_data;
pub mod knowledge;
pub mod llm;
pub mod memory;
pub mod specialists;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use coordinator::workflow::launch;
pub use coordinator::{Coordinator, Reply, ReplyStatus, SessionContext};
