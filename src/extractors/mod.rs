mod form;
mod json;
mod principal;

pub use form::*;
pub use json::*;
