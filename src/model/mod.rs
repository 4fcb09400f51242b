pub mod config;
pub mod settings;
pub mod stats;
pub mod task;

pub use config::*;
pub use settings::*;
pub use stats::*;
pub use task::*;
