pub mod config;
pub mod error;
pub mod types;

pub use config::{EngineConfig, WarSettings};
pub use error::{ActionError, EngineError, Result};
