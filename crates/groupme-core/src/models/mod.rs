mod ids;
mod structs;

pub use ids::*;
pub use structs::*;
