//! Static analysis of a single straight beam
//!
//! Reactions, shear and bending moment, crack-weakened section properties,
//! point stresses and a strength verdict, for a rectangular beam on two
//! supports under point loads, point moments and uniform line loads.
//!
//! Build an [`AnalysisSession`] once and query it; every query is a pure
//! function of the session.

pub mod types;
pub mod section;
pub mod loads;
pub mod physics;
pub mod capacity;
pub mod session;

pub use types::*;
pub use session::{AnalysisError, AnalysisSession, SessionBuilder, SessionConfig};
