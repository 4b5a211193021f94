//! Minimal W3C WebDriver client
//!
//! Speaks the WebDriver wire protocol (JSON over HTTP) against a
//! chromedriver-compatible endpoint. Only the handful of commands the form
//! layer needs are implemented: session lifecycle, navigation, CSS element
//! search (root and nested), element text and click.

use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// W3C element identifier key in element reference payloads
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

pub type Result<T> = std::result::Result<T, WebDriverError>;

#[derive(Debug, Error)]
pub enum WebDriverError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("webdriver error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed webdriver response: {0}")]
    Protocol(String),
}

#[derive(Debug, Deserialize)]
struct NewSessionValue {
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct StatusValue {
    ready: bool,
}

/// HTTP client for one WebDriver endpoint, holding at most one session
pub struct WebDriverClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<String>,
}

impl WebDriverClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// True when the endpoint reports it is ready for new sessions.
    pub async fn status(&self) -> Result<bool> {
        let value = self.get("/status").await?;
        let status: StatusValue = serde_json::from_value(value)
            .map_err(|e| WebDriverError::Protocol(format!("status payload: {e}")))?;
        Ok(status.ready)
    }

    /// Starts a Chrome session. Replaces any session id held previously.
    pub async fn new_session(&mut self) -> Result<()> {
        let body = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": ["--start-maximized"] }
                }
            }
        });
        let value = self.post("/session", &body).await?;
        let session: NewSessionValue = serde_json::from_value(value)
            .map_err(|e| WebDriverError::Protocol(format!("session payload: {e}")))?;
        debug!(session = %session.session_id, "webdriver session created");
        self.session = Some(session.session_id);
        Ok(())
    }

    /// Ends the current session. No-op when none is active.
    pub async fn delete_session(&mut self) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let endpoint = format!("{}/session/{}", self.base_url, session);
        let resp = self.http.delete(&endpoint).send().await?;
        Self::check(resp).await?;
        debug!(session = %session, "webdriver session deleted");
        Ok(())
    }

    pub async fn navigate(&self, url: &str) -> Result<()> {
        let path = format!("/session/{}/url", self.session()?);
        self.post(&path, &json!({ "url": url })).await?;
        Ok(())
    }

    /// Elements matching the CSS selector, in document order. An empty
    /// match is an empty vector, not an error.
    pub async fn find_elements(&self, css: &str) -> Result<Vec<String>> {
        let path = format!("/session/{}/elements", self.session()?);
        let value = self.post(&path, &locator(css)).await?;
        element_ids(value)
    }

    /// Elements matching the CSS selector within another element.
    pub async fn find_elements_within(&self, element: &str, css: &str) -> Result<Vec<String>> {
        let path = format!("/session/{}/element/{}/elements", self.session()?, element);
        let value = self.post(&path, &locator(css)).await?;
        element_ids(value)
    }

    /// Rendered text of the element.
    pub async fn text(&self, element: &str) -> Result<String> {
        let path = format!("/session/{}/element/{}/text", self.session()?, element);
        let value = self.get(&path).await?;
        value
            .as_str()
            .map(String::from)
            .ok_or_else(|| WebDriverError::Protocol("element text is not a string".into()))
    }

    /// Clicks the element.
    pub async fn click(&self, element: &str) -> Result<()> {
        let path = format!("/session/{}/element/{}/click", self.session()?, element);
        self.post(&path, &json!({})).await?;
        Ok(())
    }

    fn session(&self) -> Result<&str> {
        self.session
            .as_deref()
            .ok_or_else(|| WebDriverError::Protocol("no active webdriver session".into()))
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        Self::check(resp).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::check(resp).await
    }

    /// Unwraps the protocol's `{"value": ...}` envelope, mapping non-2xx
    /// responses to an API error carrying the endpoint's message.
    async fn check(resp: reqwest::Response) -> Result<Value> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .text()
                .await
                .ok()
                .and_then(|body| {
                    serde_json::from_str::<Value>(&body)
                        .ok()
                        .and_then(|v| {
                            v.pointer("/value/message")
                                .and_then(Value::as_str)
                                .map(String::from)
                        })
                        .or(Some(body))
                })
                .unwrap_or_default();
            return Err(WebDriverError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut payload: Value = resp.json().await?;
        match payload.get_mut("value") {
            Some(value) => Ok(value.take()),
            None => Err(WebDriverError::Protocol(
                "response has no value field".into(),
            )),
        }
    }
}

fn locator(css: &str) -> Value {
    json!({ "using": "css selector", "value": css })
}

/// Extracts element ids from a find-elements response value.
fn element_ids(value: Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| WebDriverError::Protocol("element list is not an array".into()))?;
    items
        .iter()
        .map(|item| {
            item.get(ELEMENT_KEY)
                .and_then(Value::as_str)
                .map(String::from)
                .ok_or_else(|| WebDriverError::Protocol("element reference missing id".into()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids_extracts_w3c_references() {
        let value = json!([
            { (ELEMENT_KEY): "abc" },
            { (ELEMENT_KEY): "def" },
        ]);
        let ids = element_ids(value).unwrap();
        assert_eq!(ids, vec!["abc", "def"]);
    }

    #[test]
    fn test_element_ids_empty_match_is_empty_vec() {
        let ids = element_ids(json!([])).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_element_ids_rejects_malformed_reference() {
        let result = element_ids(json!([{ "wrong-key": "abc" }]));
        assert!(matches!(result, Err(WebDriverError::Protocol(_))));
    }

    #[test]
    fn test_no_session_is_protocol_error() {
        let client = WebDriverClient::new("http://localhost:9515/", Duration::from_secs(5));
        assert_eq!(client.base_url, "http://localhost:9515");
        assert!(matches!(
            client.session(),
            Err(WebDriverError::Protocol(_))
        ));
    }
}
