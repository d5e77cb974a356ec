pub mod config;
pub mod orchestrator;
pub mod result;

pub use config::*;
pub use orchestrator::*;
pub use result::*;
