// src/renderer/webdriver.rs
//! W3C WebDriver client over blocking HTTP.
//!
//! Talks to geckodriver or chromedriver, which must already be running at
//! `base_url`.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{Element, RenderResult, Renderer};
use crate::config::BrowserKind;
use crate::error::RenderError;

/// Key under which W3C drivers serialise element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";
const HTTP_TIMEOUT_SECS: u64 = 60;

pub struct WebDriver {
    http: Client,
    base_url: String,
    session_id: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    value: Value,
}

#[derive(Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

impl WebDriver {
    /// Open a new browser session.
    pub fn launch(base_url: &str, browser: BrowserKind, headless: bool) -> RenderResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        let mut driver = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_id: None,
        };

        let body = json!({ "capabilities": { "alwaysMatch": capabilities(browser, headless) } });
        let value = driver.send(Method::POST, "/session", Some(body))?;
        let id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| RenderError::Protocol("new session response has no sessionId".into()))?;

        tracing::info!(%browser, headless, session = id, "browser session started");
        driver.session_id = Some(id.to_string());
        Ok(driver)
    }

    fn session_path(&self, suffix: &str) -> RenderResult<String> {
        let id = self
            .session_id
            .as_deref()
            .ok_or_else(|| RenderError::Protocol("session already terminated".into()))?;
        Ok(format!("/session/{id}{suffix}"))
    }

    fn command(&self, method: Method, suffix: &str, body: Option<Value>) -> RenderResult<Value> {
        let path = self.session_path(suffix)?;
        self.send(method, &path, body)
    }

    fn send(&self, method: Method, path: &str, body: Option<Value>) -> RenderResult<Value> {
        tracing::debug!(%method, path, "webdriver command");
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send()?;
        let status = resp.status().as_u16();
        let text = resp.text()?;
        decode_response(status, &text)
    }

    fn run_script(&self, script: &str, args: Vec<Value>) -> RenderResult<Value> {
        self.command(Method::POST, "/execute/sync", Some(json!({ "script": script, "args": args })))
    }

    fn element_flag(&self, element: &Element, what: &str) -> RenderResult<bool> {
        let value = self.command(Method::GET, &format!("/element/{}/{what}", element.id()), None)?;
        value
            .as_bool()
            .ok_or_else(|| RenderError::Protocol(format!("{what} returned {value}")))
    }
}

impl Renderer for WebDriver {
    fn navigate(&mut self, url: &str) -> RenderResult<()> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))?;
        Ok(())
    }

    fn execute(&mut self, script: &str) -> RenderResult<Value> {
        self.run_script(script, Vec::new())
    }

    fn current_markup(&mut self) -> RenderResult<String> {
        match self.command(Method::GET, "/source", None)? {
            Value::String(s) => Ok(s),
            other => Err(RenderError::Protocol(format!("page source was {other}"))),
        }
    }

    fn find(&mut self, selector: &str) -> RenderResult<Option<Element>> {
        let body = json!({ "using": "css selector", "value": selector });
        match self.command(Method::POST, "/element", Some(body)) {
            Ok(value) => element_from(&value).map(Some),
            Err(e) if e.code() == Some("no such element") => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn find_all(&mut self, selector: &str) -> RenderResult<Vec<Element>> {
        let body = json!({ "using": "css selector", "value": selector });
        match self.command(Method::POST, "/elements", Some(body))? {
            Value::Array(items) => items.iter().map(element_from).collect(),
            other => Err(RenderError::Protocol(format!("find elements returned {other}"))),
        }
    }

    fn is_interactable(&mut self, element: &Element) -> RenderResult<bool> {
        Ok(self.element_flag(element, "displayed")? && self.element_flag(element, "enabled")?)
    }

    fn click(&mut self, element: &Element) -> RenderResult<()> {
        self.command(Method::POST, &format!("/element/{}/click", element.id()), Some(json!({})))?;
        Ok(())
    }

    fn scroll_into_view(&mut self, element: &Element) -> RenderResult<()> {
        self.run_script("arguments[0].scrollIntoView();", vec![element_ref(element)])?;
        Ok(())
    }

    fn terminate(&mut self) -> RenderResult<()> {
        let Some(id) = self.session_id.take() else {
            return Ok(());
        };
        self.send(Method::DELETE, &format!("/session/{id}"), None)?;
        tracing::info!(session = %id, "browser session closed");
        Ok(())
    }
}

/* ---------------- wire helpers ---------------- */

fn capabilities(browser: BrowserKind, headless: bool) -> Value {
    match browser {
        BrowserKind::Firefox => {
            let args: Vec<&str> = if headless { vec!["-headless"] } else { Vec::new() };
            json!({ "browserName": "firefox", "moz:firefoxOptions": { "args": args } })
        }
        BrowserKind::Chrome => {
            let args: Vec<&str> = if headless { vec!["--headless=new"] } else { Vec::new() };
            json!({ "browserName": "chrome", "goog:chromeOptions": { "args": args } })
        }
    }
}

fn decode_response(status: u16, text: &str) -> RenderResult<Value> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| RenderError::Protocol(format!("HTTP {status}: {e}")))?;

    if (200..300).contains(&status) {
        return Ok(envelope.value);
    }
    match serde_json::from_value::<WireError>(envelope.value) {
        Ok(w) => Err(RenderError::Command { code: w.error, message: w.message }),
        Err(_) => Err(RenderError::Protocol(format!("HTTP {status} without error body"))),
    }
}

fn element_from(value: &Value) -> RenderResult<Element> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(Element::new)
        .ok_or_else(|| RenderError::Protocol(format!("not an element reference: {value}")))
}

fn element_ref(element: &Element) -> Value {
    let mut map = Map::new();
    map.insert(ELEMENT_KEY.to_string(), Value::String(element.id().to_string()));
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_yields_value() {
        let v = decode_response(200, r#"{"value":{"sessionId":"abc","capabilities":{}}}"#).unwrap();
        assert_eq!(v["sessionId"], "abc");

        let null = decode_response(200, r#"{"value":null}"#).unwrap();
        assert!(null.is_null());
    }

    #[test]
    fn error_body_keeps_w3c_code() {
        let err = decode_response(
            404,
            r#"{"value":{"error":"no such element","message":"Unable to locate","stacktrace":""}}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), Some("no such element"));
        assert!(err.is_navigation());
    }

    #[test]
    fn garbage_is_a_protocol_error() {
        assert!(matches!(decode_response(500, "<html>oops</html>"), Err(RenderError::Protocol(_))));
        assert!(matches!(decode_response(500, r#"{"value":42}"#), Err(RenderError::Protocol(_))));
    }

    #[test]
    fn element_reference_round_trip() {
        let el = Element::new("f1e2");
        let wire = element_ref(&el);
        assert_eq!(element_from(&wire).unwrap(), el);
        assert!(element_from(&json!({"ELEMENT": "legacy"})).is_err());
    }

    #[test]
    fn headless_args_per_browser() {
        let ff = capabilities(BrowserKind::Firefox, true);
        assert_eq!(ff["moz:firefoxOptions"]["args"][0], "-headless");

        let chrome = capabilities(BrowserKind::Chrome, false);
        assert_eq!(chrome["browserName"], "chrome");
        assert!(chrome["goog:chromeOptions"]["args"].as_array().unwrap().is_empty());
    }
}
