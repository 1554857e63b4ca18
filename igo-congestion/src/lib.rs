//! Highway projection (C4), congestion mapping (C5), imputation (C6), and
//! `itime` cost building (C7) for the igo-route congestion-aware routing
//! engine.

pub mod cost;
pub mod imputer;
pub mod mapper;
pub mod pipeline;
pub mod projector;

pub use cost::build_costs;
pub use imputer::impute;
pub use mapper::{plan_congestion_writes, write_congestion};
pub use pipeline::{initial_build, refresh};
pub use projector::project_highways;
