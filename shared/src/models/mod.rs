//! Domain models for the roast loss calculator

mod levels;
mod row;
mod session;

pub use levels::*;
pub use row::*;
pub use session::*;
