#![allow(unused_imports)]

pub(crate) use super::macros::*;
pub use super::{App, Classroom, Role, User};
pub use assert_json_diff::{assert_json_eq, assert_json_include};
pub use classroom_backend::error;
pub use http::StatusCode;
pub use serde_json::{json, Value};
pub use uuid::Uuid;
