use super::{response::TestResponse, User};
use reqwest::multipart::Form;
use serde::Serialize;

#[derive(Debug)]
pub struct RequestBuilder {
    builder: reqwest::RequestBuilder,
}

#[allow(unused)]
impl RequestBuilder {
    pub(super) fn new(builder: reqwest::RequestBuilder) -> Self {
        RequestBuilder { builder }
    }

    pub async fn send(self) -> TestResponse {
        TestResponse::new(self.builder.send().await.expect("failed to send request"))
    }

    pub fn json<T>(mut self, value: &T) -> RequestBuilder
    where
        T: Serialize,
    {
        self.builder = self.builder.json(value);
        self
    }

    pub fn multipart(mut self, form: Form) -> RequestBuilder {
        self.builder = self.builder.multipart(form);
        self
    }

    pub fn user(mut self, user: &User) -> RequestBuilder {
        self.builder = self.builder.bearer_auth(&user.access_token);
        self
    }

    pub fn token(mut self, token: &str) -> RequestBuilder {
        self.builder = self.builder.bearer_auth(token);
        self
    }
}
