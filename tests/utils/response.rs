use http::StatusCode;
use serde::de::DeserializeOwned;

#[derive(Debug)]
pub struct TestResponse {
    response: reqwest::Response,
}

impl TestResponse {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        TestResponse { response }
    }

    pub async fn json<T: DeserializeOwned>(self) -> T {
        self.response
            .json()
            .await
            .expect("failed to deserialize to json")
    }

    #[allow(unused)]
    pub async fn bytes(self) -> Vec<u8> {
        self.response
            .bytes()
            .await
            .expect("failed to read body")
            .to_vec()
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    #[allow(unused)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }
}
