mod builder;
mod command;
mod vertex;

pub use builder::*;
pub use command::*;
pub use vertex::*;
