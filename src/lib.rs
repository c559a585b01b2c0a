pub mod config;
pub mod archive;
pub mod storage;
pub mod upload;
pub mod runner;

// Driver modules (point to project root drivers via path attribute) / 驱动模块
#[path = "../drivers/mod.rs"]
pub mod drivers;

pub use config::{AppConfig, ConfigError};
pub use runner::{run, RunOutcome};
