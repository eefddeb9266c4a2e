mod error;
pub mod lexer;
mod object;
mod validate;

pub use error::*;
pub use object::*;
pub use validate::*;
