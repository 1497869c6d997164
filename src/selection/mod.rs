mod model;
mod parser;

pub use model::*;
pub use parser::*;
