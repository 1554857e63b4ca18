//! Runtime orchestration for the congestion-aware routing engine: the
//! feed client / cache pipeline (C1-C2), the one-time highway projection
//! plus congestion build (C4-C7), the refresh scheduler (C8), and the
//! router (C9), wired together behind a single `Engine` facade.

pub mod build;
pub mod config;
pub mod engine;
pub mod error;
pub mod publisher;
pub mod scheduler;
pub mod workers;

pub use build::Sources;
pub use config::RuntimeConfig;
pub use engine::{Engine, SharedEngine};
pub use error::{EngineError, Result};
pub use publisher::SnapshotPublisher;
pub use workers::QueryPool;
