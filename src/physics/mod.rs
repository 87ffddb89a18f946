pub mod internal_forces;
pub mod statics;
pub mod stress;

pub use internal_forces::*;
pub use statics::*;
pub use stress::*;
