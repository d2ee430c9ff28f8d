pub mod demand;
pub mod line;
pub mod plant;

pub use demand::*;
pub use line::*;
pub use plant::*;
