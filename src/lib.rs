pub mod config_store;
pub mod locator;
pub mod logs;
pub mod metrics;
pub mod missions;
pub mod settings;
pub mod supervisor;
