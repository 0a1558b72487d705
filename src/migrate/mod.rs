//! Migration driver module

pub mod config;
pub mod engine;
pub mod plan;
pub mod storage;

pub use config::{FailedRecordPolicy, MigrateConfig};
pub use engine::{CopyFailure, MigrationEngine, MigrationOptions, MigrationResult};
pub use plan::MigrationPlan;
