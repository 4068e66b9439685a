//! Type definitions

pub mod edge;
pub mod node;
pub mod params;
pub mod solution;
pub mod transport;

pub use edge::*;
pub use node::*;
pub use params::*;
pub use solution::*;
pub use transport::*;
