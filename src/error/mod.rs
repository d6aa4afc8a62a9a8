mod constants;
mod db;

pub use constants::*;
pub use db::*;

use crate::storage::StorageError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::{BufMut, Bytes, BytesMut};
use sea_orm::DbErr;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error<'a> {
    status: StatusCode,
    code: &'static str,
    message: &'a str,
}

pub type Result<T = ()> = std::result::Result<T, Error<'static>>;

impl<'a> Error<'a> {
    #[inline]
    pub fn internal<E: std::fmt::Debug>(error: E) -> Self {
        error!("internal error: {:?}", error);
        constants::INTERNAL
    }

    #[inline]
    const fn new(status: StatusCode, code: &'static str, message: &'a str) -> Error<'a> {
        Self {
            status,
            code,
            message,
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    #[inline]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub const fn message(&self) -> &str {
        self.message
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(128).writer();

        // serializing a map of two strings cannot fail
        let _ = serde_json::to_writer(
            &mut buf,
            &json!({
                "code": self.code(),
                "error": self.message(),
            }),
        );

        buf.into_inner().freeze()
    }
}

impl IntoResponse for Error<'_> {
    #[inline]
    fn into_response(self) -> Response {
        let buf = self.to_bytes();
        let mut res = (self.status, buf).into_response();

        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
        );

        res
    }
}

impl From<DbErr> for Error<'_> {
    #[inline]
    fn from(error: DbErr) -> Self {
        error!("database error: {:?}", error);
        constants::DATABASE_ERROR
    }
}

impl From<StorageError> for Error<'_> {
    #[inline]
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => constants::DOCUMENT_NOT_FOUND,
            StorageError::InvalidKey(key) => {
                warn!(key = %key, "tried invalid document key");
                constants::DOCUMENT_NOT_FOUND
            }
            error => {
                error!("storage error: {:?}", error);
                constants::STORAGE_ERROR
            }
        }
    }
}

macro_rules! const_error {
    ($name:ident, $status:ident, $msg:literal) => {
        pub const $name: $crate::error::Error =
            $crate::error::Error::new(::axum::http::StatusCode::$status, stringify!($name), $msg);
    };
}

#[allow(clippy::useless_attribute)]
#[allow(clippy::needless_pub_self)]
pub(self) use const_error;
