use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use crate::error::Result;

pub const CLIENT_KEY_HEADER:&str = "Moku-Client-Key";

/// Status, client key header and body of one response; everything the unwrapper needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub client_key: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status:u16, body:&str) -> Self {
        Self{ status, client_key: None, body: body.to_owned() }
    }
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {

    pub fn new(timeout:Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self{ client })
    }

    pub fn get(&self, url:&str, key:Option<&str>) -> Result<RawResponse> {
        debug!(url, "GET");
        self.send(self.client.get(url), key)
    }

    pub fn post(&self, url:&str, key:Option<&str>, body:String) -> Result<RawResponse> {
        debug!(url, len = body.len(), "POST");
        self.send(self.client.post(url).body(body), key)
    }

    fn send(&self, mut req:RequestBuilder, key:Option<&str>) -> Result<RawResponse> {
        if let Some(k) = key {
            req = req.header(CLIENT_KEY_HEADER, k);
        }

        let resp = req.send()?;

        let status:u16 = resp.status().as_u16();
        let client_key:Option<String> = resp.headers()
            .get(CLIENT_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_owned());
        let body:String = resp.text()?;

        debug!(status, bytes = body.len(), "response");
        Ok(RawResponse{ status, client_key, body })
    }

}
