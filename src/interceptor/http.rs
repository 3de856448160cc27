// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Owned request/response descriptions passed through the interceptor
//!
//! Handlers never mutate a shared request; they build a new value and hand
//! it to the transport.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use crate::error::{ApiError, BoltError, Result};

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| BoltError::InvalidInput(format!("invalid url {}: {}", url, e)))?;
        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    pub fn get(url: &str) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    pub fn post(url: &str) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.set_header(name, value)?;
        Ok(self)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_json_body(mut self, body: &Value) -> Result<Self> {
        self.body = Some(serde_json::to_string(body)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| BoltError::InvalidInput(format!("invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| BoltError::InvalidInput(format!("invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Scheme, host and port, e.g. `https://wus2.core.example.com`
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// First label of the host name (`wus2` for `wus2.core.example.com`)
    pub fn host_label(&self) -> Option<&str> {
        self.url
            .host_str()
            .and_then(|host| host.split('.').next())
            .filter(|label| !label.is_empty())
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| BoltError::InvalidInput(format!("{} has no body", self.url)))?;
        Ok(serde_json::from_str(body)?)
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn json_value(status: StatusCode, body: &Value) -> Self {
        let mut response = Self::new(status, body.to_string());
        response
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Same status and headers with `body` serialized in place of the old one
    pub fn with_json_body(mut self, body: &Value) -> Result<Self> {
        self.body = serde_json::to_string(body)?;
        self.headers.remove(reqwest::header::CONTENT_LENGTH);
        Ok(self)
    }
}

/// Borrow `value[key]` as an object, creating it (or replacing a non-object)
/// first.
pub fn ensure_object<'a>(
    value: &'a mut Value,
    key: &str,
) -> Result<&'a mut serde_json::Map<String, Value>> {
    let map = value.as_object_mut().ok_or_else(|| {
        ApiError::InvalidResponse(format!("expected a JSON object around '{}'", key))
    })?;
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Default::default()));
    if !entry.is_object() {
        *entry = Value::Object(Default::default());
    }
    entry
        .as_object_mut()
        .ok_or_else(|| ApiError::InvalidResponse(format!("'{}' is not an object", key)).into())
}
