mod expand;
mod model;
mod registry;

pub use expand::*;
pub use model::*;
pub use registry::*;
