mod join_code;
mod orm;
mod signal;

pub use join_code::*;
pub use orm::*;
pub use signal::*;
