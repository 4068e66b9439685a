//! Relief Router - staged route planning for disaster relief logistics
//!
//! Routes cargo from one origin depot through priority stages with a
//! backward dynamic-programming recursion, ordering the stops inside each
//! stage with a local tour heuristic.

pub mod config;
pub mod defaults;
pub mod error;
pub mod services;
pub mod types;

pub use error::{PlannerError, PlannerResult};
pub use services::engine::{DualOptimization, Optimization, StageEngine};
