pub mod progress;
pub mod registry;
pub mod session;
